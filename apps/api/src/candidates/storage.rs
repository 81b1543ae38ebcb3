use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Writes uploaded resumes to the static-serving uploads directory, plus a
/// best-effort copy under the application's base directory.
#[derive(Debug, Clone)]
pub struct ResumeStorage {
    primary: PathBuf,
    secondary: Option<PathBuf>,
}

impl ResumeStorage {
    pub fn new(primary: PathBuf, secondary: Option<PathBuf>) -> Self {
        let secondary = secondary.filter(|dir| dir != &primary);
        Self { primary, secondary }
    }

    pub fn primary_dir(&self) -> &Path {
        &self.primary
    }

    /// Only the primary write can fail the upload. A failed secondary copy is
    /// logged and otherwise ignored.
    pub async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        let primary_path = write_into(&self.primary, file_name, data)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "failed to write {} into {}: {e}",
                    file_name,
                    self.primary.display()
                ))
            })?;
        debug!("Stored resume at {}", primary_path.display());

        if let Some(dir) = &self.secondary {
            if let Err(e) = write_into(dir, file_name, data).await {
                warn!(
                    "Secondary copy of {} into {} failed: {e}",
                    file_name,
                    dir.display()
                );
            }
        }

        Ok(primary_path)
    }
}

async fn write_into(dir: &Path, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

/// Longest extension kept from an uploaded file name.
const MAX_EXTENSION_LEN: usize = 10;

/// `candidate_{id}_{uuid}{.ext}`, keeping the uploaded file's extension when
/// it is at most `MAX_EXTENSION_LEN` plain ASCII alphanumerics.
pub fn resume_file_name(candidate_id: i32, original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("candidate_{candidate_id}_{}{extension}", Uuid::new_v4())
}
