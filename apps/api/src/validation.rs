//! Payload normalization shared by the job and candidate requests.
//!
//! Requests are trimmed here, then checked with their `Validate` derive.
//! Length limits on the derives mirror the column sizes in the migrations.

use validator::ValidationErrors;

use crate::errors::AppError;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Trimmed; blank becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|v| !v.is_empty())
}
