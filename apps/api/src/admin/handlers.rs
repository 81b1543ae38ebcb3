//! Admin-only user management.
//!
//! Deleting or demoting a user leaves their jobs and candidates in place, and
//! an admin may delete or demote their own account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{Role, UserSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

/// GET /api/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    user.require_admin()?;
    Ok(Json(state.store.list_users().await?))
}

/// POST /api/admin/users/:id/role
pub async fn handle_update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ApiJson(update): ApiJson<RoleUpdate>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    let role: Role = update.role.parse().map_err(AppError::Validation)?;

    if !state.store.update_user_role(id, role).await? {
        return Err(AppError::not_found("User", id));
    }
    info!("Admin {} set role of user {} to {}", user.id, id, role);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    if !state.store.delete_user(id).await? {
        return Err(AppError::not_found("User", id));
    }
    info!("Admin {} deleted user {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
