use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Application status. Mutated directly; there is no enforced transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status")]
pub enum JobStatus {
    #[serde(alias = "applied")]
    Applied,
    #[serde(alias = "interview")]
    Interview,
    #[serde(alias = "offer")]
    Offer,
    #[serde(alias = "rejected")]
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub status: JobStatus,
    pub date_applied: NaiveDate,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub next_steps: Option<String>,
    pub owner_id: i32,
    pub owner_username: Option<String>,
    pub candidate_id: Option<i32>,
    /// Copy of the candidate's name taken when the job was last written.
    /// Not kept in sync if the candidate is renamed.
    pub candidate_name: Option<String>,
    pub version: i32,
    pub last_updated: DateTime<Utc>,
}

/// The mutable part of a job, overwritten in full on update.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub status: JobStatus,
    pub date_applied: NaiveDate,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub next_steps: Option<String>,
    pub candidate_id: Option<i32>,
    pub candidate_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub owner_id: i32,
    pub owner_username: Option<String>,
    pub fields: JobFields,
}
