use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::candidate::CandidateFields;
use crate::validation::{non_blank, trimmed};

/// Body of `POST /api/candidates` and `PUT /api/candidates/:id`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "fullName must be 1-200 characters"))]
    pub full_name: String,
    #[validate(
        email(message = "email is not a valid email address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
    #[validate(length(max = 500, message = "resumePath must be at most 500 characters"))]
    pub resume_path: Option<String>,
}

impl CandidateRequest {
    pub fn into_fields(self) -> Result<CandidateFields, AppError> {
        let request = CandidateRequest {
            full_name: trimmed(self.full_name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            notes: non_blank(self.notes),
            resume_path: non_blank(self.resume_path),
            ..self
        };
        request.validate()?;
        Ok(CandidateFields {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            notes: request.notes,
            resume_path: request.resume_path,
        })
    }
}
