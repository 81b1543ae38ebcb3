use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::errors::AppError;
use crate::models::job::{JobFields, JobStatus};
use crate::validation::{non_blank, trimmed};

/// Body of `POST /api/jobs` and `PUT /api/jobs/:id`.
///
/// Owner and timestamp fields sent by the client are ignored; the server stamps them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "company must be 1-200 characters"))]
    pub company: String,
    #[validate(length(min = 1, max = 200, message = "location must be 1-200 characters"))]
    pub location: String,
    pub status: JobStatus,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date_applied: NaiveDate,
    #[validate(length(max = 50, message = "salary must be at most 50 characters"))]
    pub salary: Option<String>,
    pub notes: Option<String>,
    #[validate(length(max = 100, message = "contactName must be at most 100 characters"))]
    pub contact_name: Option<String>,
    #[validate(
        email(message = "contactEmail is not a valid email address"),
        length(max = 100, message = "contactEmail must be at most 100 characters")
    )]
    pub contact_email: Option<String>,
    #[validate(length(max = 500, message = "nextSteps must be at most 500 characters"))]
    pub next_steps: Option<String>,
    pub candidate_id: Option<i32>,
    /// Version the client last read. Absent means "whatever is stored now".
    pub version: Option<i32>,
}

impl JobRequest {
    /// Trims, validates and converts the payload. The candidate snapshot is
    /// left empty for the handler to fill.
    pub fn into_fields(self) -> Result<JobFields, AppError> {
        let request = self.normalized();
        request.validate()?;
        Ok(JobFields {
            title: request.title,
            company: request.company,
            location: request.location,
            status: request.status,
            date_applied: request.date_applied,
            salary: request.salary,
            notes: request.notes,
            contact_name: request.contact_name,
            contact_email: request.contact_email,
            next_steps: request.next_steps,
            candidate_id: request.candidate_id,
            candidate_name: None,
        })
    }

    fn normalized(self) -> Self {
        JobRequest {
            title: trimmed(self.title),
            company: trimmed(self.company),
            location: trimmed(self.location),
            salary: non_blank(self.salary),
            notes: non_blank(self.notes),
            contact_name: non_blank(self.contact_name),
            contact_email: non_blank(self.contact_email),
            next_steps: non_blank(self.next_steps),
            ..self
        }
    }
}

/// Accepts `YYYY-MM-DD`, or a full timestamp whose date part is used.
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
}
