use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::errors::AppError;
use crate::state::AppState;

/// `scheme://host` the client used to reach us, or `PUBLIC_BASE_URL` when configured.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOrigin(pub String);

impl RequestOrigin {
    pub fn absolute(&self, path: &str) -> String {
        absolute_url(&self.0, path)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(base) = &state.config.public_base_url {
            return Ok(RequestOrigin(base.clone()));
        }

        let scheme = forwarded_scheme(&parts.headers);

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| format!("localhost:{}", state.config.port));

        Ok(RequestOrigin(format!("{scheme}://{host}")))
    }
}

/// First `X-Forwarded-Proto` value when it is `http` or `https`; anything
/// else, including a missing header, yields `http`.
fn forwarded_scheme(headers: &HeaderMap) -> &'static str {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or_default();
    if proto.eq_ignore_ascii_case("https") {
        "https"
    } else {
        "http"
    }
}

/// Prefixes server-relative paths with `origin`; absolute URLs and empty
/// strings pass through.
pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
