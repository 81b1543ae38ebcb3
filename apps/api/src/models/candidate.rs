use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Absolute URL once a resume is uploaded. Older rows may hold a
    /// server-relative path; readers rewrite it before responding.
    pub resume_path: Option<String>,
    pub notes: Option<String>,
    pub owner_id: i32,
    pub owner_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFields {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub owner_id: i32,
    pub owner_username: Option<String>,
    pub fields: CandidateFields,
}
