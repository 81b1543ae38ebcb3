use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;
use crate::store::Scope;

/// The verified caller of a request, taken from its bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may touch any record; everyone else only records they own.
    pub fn can_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.id == owner_id
    }

    pub fn ensure_can_access(&self, owner_id: i32) -> Result<(), AppError> {
        if self.can_access(owner_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Which rows this caller sees in list and aggregate queries.
    pub fn scope(&self) -> Scope {
        if self.is_admin() {
            Scope::All
        } else {
            Scope::Owner(self.id)
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .jwt
            .validate(token.trim())
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

        let id = claims
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Token subject is not a user id".to_string()))?;

        Ok(AuthUser {
            id,
            username: claims.username,
            role: claims.role,
        })
    }
}
