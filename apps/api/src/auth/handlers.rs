use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{NewUser, Role, UserSummary};
use crate::state::AppState;

const MAX_USERNAME_LEN: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub user_id: i32,
    pub username: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<Role, AppError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::Validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        match self.role.as_deref() {
            None => Ok(Role::User),
            Some(raw) if raw.trim().is_empty() => Ok(Role::User),
            Some(raw) => raw.parse::<Role>().map_err(AppError::Validation),
        }
    }
}

/// POST /api/authentication/register
///
/// Creates a `User` account. Self-registration as `Admin` is refused unless
/// `ALLOW_ADMIN_REGISTRATION` is set.
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), AppError> {
    let role = request.validate()?;
    if role == Role::Admin && !state.config.allow_admin_registration {
        warn!("Refused self-registration as Admin for '{}'", request.username.trim());
        return Err(AppError::Forbidden);
    }

    let username = request.username.trim().to_string();
    if state.store.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict(format!("Username '{username}' already exists")));
    }

    let digest = hash_password(&request.password);
    let user = state
        .store
        .insert_user(NewUser {
            username,
            password_hash: digest.hash,
            password_salt: digest.salt,
            role,
        })
        .await?;

    info!("Registered user {} ({}) as {}", user.id, user.username, user.role);
    Ok((StatusCode::CREATED, Json(UserSummary::from(&user))))
}

/// POST /api/authentication/login
///
/// Unknown usernames and wrong passwords produce the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .store
        .find_user_by_username(request.username.trim())
        .await?;
    let user = match user {
        Some(u) if verify_password(&request.password, &u.password_hash, &u.password_salt) => u,
        _ => {
            warn!("Failed login for '{}'", request.username.trim());
            return Err(invalid());
        }
    };

    let token = state
        .jwt
        .issue(&user)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        token,
        role: user.role,
        user_id: user.id,
        username: user.username,
    }))
}
