//! Axum route handlers for the Candidates API.
//!
//! Resume paths are rewritten to absolute URLs on every response.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use tracing::info;

use crate::auth::AuthUser;
use crate::candidates::request::CandidateRequest;
use crate::candidates::urls::RequestOrigin;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::state::AppState;

pub(crate) fn with_absolute_resume(mut candidate: Candidate, origin: &RequestOrigin) -> Candidate {
    if let Some(path) = candidate.resume_path.take() {
        candidate.resume_path = Some(origin.absolute(&path));
    }
    candidate
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    user: AuthUser,
    origin: RequestOrigin,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let candidates = state
        .store
        .list_candidates(user.scope())
        .await?
        .into_iter()
        .map(|c| with_absolute_resume(c, &origin))
        .collect();
    Ok(Json(candidates))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    user: AuthUser,
    origin: RequestOrigin,
    Path(id): Path<i32>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state
        .store
        .find_candidate(id)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;
    user.ensure_can_access(candidate.owner_id)?;
    Ok(Json(with_absolute_resume(candidate, &origin)))
}

/// POST /api/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    user: AuthUser,
    origin: RequestOrigin,
    ApiJson(request): ApiJson<CandidateRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Candidate>), AppError> {
    let fields = request.into_fields()?;
    let candidate = state
        .store
        .insert_candidate(NewCandidate {
            owner_id: user.id,
            owner_username: Some(user.username.clone()),
            fields,
        })
        .await?;

    info!("User {} created candidate {}", user.id, candidate.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/candidates/{}", candidate.id))],
        Json(with_absolute_resume(candidate, &origin)),
    ))
}

/// PUT /api/candidates/:id
///
/// Full overwrite, including `resumePath`. Jobs holding this candidate's name
/// keep their old snapshot.
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<CandidateRequest>,
) -> Result<StatusCode, AppError> {
    if request.id != Some(id) {
        return Err(AppError::Validation(
            "Candidate id in the path does not match the payload".to_string(),
        ));
    }

    let existing = state
        .store
        .find_candidate(id)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;
    user.ensure_can_access(existing.owner_id)?;

    let fields = request.into_fields()?;
    state
        .store
        .update_candidate(id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;

    info!("User {} updated candidate {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/candidates/:id
///
/// Jobs referencing the candidate are left as they are.
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let existing = state
        .store
        .find_candidate(id)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;
    user.ensure_can_access(existing.owner_id)?;

    if !state.store.delete_candidate(id).await? {
        return Err(AppError::not_found("Candidate", id));
    }
    info!("User {} deleted candidate {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
