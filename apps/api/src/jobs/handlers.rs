//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::request::JobRequest;
use crate::jobs::stats::JobStats;
use crate::models::job::{Job, NewJob};
use crate::state::AppState;
use crate::store::Store;

/// Current name of the referenced candidate, or `None` if there is no
/// reference or the candidate no longer exists.
async fn candidate_name_snapshot(
    store: &dyn Store,
    candidate_id: Option<i32>,
) -> Result<Option<String>, AppError> {
    let Some(id) = candidate_id else {
        return Ok(None);
    };
    Ok(store.find_candidate(id).await?.map(|c| c.full_name))
}

/// GET /api/jobs
///
/// Admins see every job; other users only their own.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(state.store.list_jobs(user.scope()).await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .store
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job", id))?;
    user.ensure_can_access(job.owner_id)?;
    Ok(Json(job))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<JobRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Job>), AppError> {
    let mut fields = request.into_fields()?;
    fields.candidate_name = candidate_name_snapshot(state.store.as_ref(), fields.candidate_id).await?;

    let job = state
        .store
        .insert_job(NewJob {
            owner_id: user.id,
            owner_username: Some(user.username.clone()),
            fields,
        })
        .await?;

    info!("User {} created job {}", user.id, job.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/jobs/{}", job.id))],
        Json(job),
    ))
}

/// PUT /api/jobs/:id
///
/// Full overwrite of the mutable fields. A write that loses a race against
/// another update is reported as 409, or 404 if the job was deleted meanwhile.
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<JobRequest>,
) -> Result<StatusCode, AppError> {
    if request.id != Some(id) {
        return Err(AppError::Validation(
            "Job id in the path does not match the payload".to_string(),
        ));
    }

    let existing = state
        .store
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job", id))?;
    user.ensure_can_access(existing.owner_id)?;

    let expected_version = request.version.unwrap_or(existing.version);
    let mut fields = request.into_fields()?;
    fields.candidate_name = candidate_name_snapshot(state.store.as_ref(), fields.candidate_id).await?;

    match state.store.update_job(id, expected_version, &fields).await? {
        Some(job) => {
            info!("User {} updated job {} (version {})", user.id, id, job.version);
            Ok(StatusCode::NO_CONTENT)
        }
        None => {
            if state.store.find_job(id).await?.is_none() {
                return Err(AppError::not_found("Job", id));
            }
            warn!("Stale update of job {id} at version {expected_version}");
            Err(AppError::Conflict(format!(
                "Job {id} was modified by another request; reload and retry"
            )))
        }
    }
}

/// DELETE /api/jobs/:id
///
/// Admin only, regardless of ownership.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    if !state.store.delete_job(id).await? {
        return Err(AppError::not_found("Job", id));
    }
    info!("Admin {} deleted job {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/jobs/stats
///
/// Job counts per status, scoped like the list endpoint.
pub async fn handle_job_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<JobStats>, AppError> {
    let counts = state.store.count_jobs_by_status(user.scope()).await?;
    Ok(Json(JobStats::from_counts(&counts)))
}
