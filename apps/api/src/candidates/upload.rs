use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::candidates::storage::resume_file_name;
use crate::candidates::urls::RequestOrigin;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

/// Width of `candidates.resume_path`.
const MAX_RESUME_URL_LEN: usize = 500;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

struct UploadedFile {
    file_name: Option<String>,
    data: Bytes,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large".to_string())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// First `file` field; any other fields are drained and ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    let mut found = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if found.is_none() && field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;
            found = Some(UploadedFile { file_name, data });
        } else {
            field.bytes().await.map_err(multipart_error)?;
        }
    }
    Ok(found)
}

/// POST /api/candidates/:id/uploadResume
///
/// Stores the file under a fresh name and records its absolute URL as the
/// candidate's resume. Concurrent uploads never collide on disk; the stored
/// reference ends up pointing at whichever commit lands last.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    origin: RequestOrigin,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let candidate = state
        .store
        .find_candidate(id)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;
    user.ensure_can_access(candidate.owner_id)?;

    let upload = match read_file_field(&mut multipart).await? {
        Some(upload) if !upload.data.is_empty() => upload,
        _ => return Err(AppError::Validation("No file".to_string())),
    };

    let stored_name = resume_file_name(id, upload.file_name.as_deref());
    let url = origin.absolute(&format!("/uploads/{stored_name}"));
    if url.chars().count() > MAX_RESUME_URL_LEN {
        return Err(AppError::Validation(format!(
            "Resume URL would exceed {MAX_RESUME_URL_LEN} characters"
        )));
    }

    state.storage.save(&stored_name, &upload.data).await?;
    state
        .store
        .set_candidate_resume(id, &url)
        .await?
        .ok_or_else(|| AppError::not_found("Candidate", id))?;

    info!(
        "User {} uploaded resume for candidate {} ({} bytes) -> {}",
        user.id,
        id,
        upload.data.len(),
        stored_name
    );
    Ok(Json(UploadResponse { url }))
}
