use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
    pub port: u16,
    pub rust_log: String,
    /// Directory served as static content. Resumes land in `<static_root>/uploads`.
    pub static_root: PathBuf,
    /// Overrides the scheme+host derived from the request when building resume URLs.
    pub public_base_url: Option<String>,
    pub max_upload_bytes: usize,
    /// Empty means permissive CORS.
    pub cors_origins: Vec<String>,
    pub allow_admin_registration: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_ttl_secs: std::env::var("JWT_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse::<i64>()
                .context("JWT_TTL_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            static_root: std::env::var("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("wwwroot")),
            public_base_url: optional_env("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            cors_origins: optional_env("CORS_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            allow_admin_registration: optional_env("ALLOW_ADMIN_REGISTRATION")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            admin_username: optional_env("ADMIN_USERNAME"),
            admin_password: optional_env("ADMIN_PASSWORD"),
        })
    }

    /// Primary upload directory, under the static-serving root.
    pub fn upload_dir(&self) -> PathBuf {
        self.static_root.join("uploads")
    }

    /// Secondary upload directory next to the running binary, for deployments
    /// where static files are served from the published location.
    pub fn secondary_upload_dir(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join("wwwroot").join("uploads"))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
impl Config {
    pub fn for_tests(static_root: PathBuf) -> Self {
        Config {
            database_url: "postgres://unused".to_string(),
            jwt_secret: "test-secret-key-for-testing".to_string(),
            jwt_ttl_secs: 3600,
            port: 8080,
            rust_log: "debug".to_string(),
            static_root,
            public_base_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origins: vec![],
            allow_admin_registration: false,
            admin_username: None,
            admin_password: None,
        }
    }
}
