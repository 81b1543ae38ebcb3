//! Persistence seam.
//!
//! Handlers talk to a `Store` rather than to a pool directly. `AppState` holds an
//! `Arc<dyn Store>`: `PgStore` in production, `MemoryStore` in tests.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateFields, NewCandidate};
use crate::models::job::{Job, JobFields, JobStatus, NewJob};
use crate::models::user::{NewUser, Role, User, UserSummary};

pub use postgres::PgStore;

/// Row visibility for list and aggregate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Owner(i32),
}

#[async_trait]
pub trait Store: Send + Sync {
    // ── users ──────────────────────────────────────────────────────────────
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    /// Fails with `AppError::Conflict` if the username is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn list_users(&self) -> Result<Vec<UserSummary>, AppError>;
    /// Returns false if no such user.
    async fn update_user_role(&self, id: i32, role: Role) -> Result<bool, AppError>;
    async fn delete_user(&self, id: i32) -> Result<bool, AppError>;

    // ── jobs ───────────────────────────────────────────────────────────────
    async fn list_jobs(&self, scope: Scope) -> Result<Vec<Job>, AppError>;
    async fn find_job(&self, id: i32) -> Result<Option<Job>, AppError>;
    async fn insert_job(&self, job: NewJob) -> Result<Job, AppError>;
    /// Overwrites the mutable fields only if the stored version equals
    /// `expected_version`, bumping the version. `None` when no row matched,
    /// either because the job is gone or because the version moved on.
    async fn update_job(
        &self,
        id: i32,
        expected_version: i32,
        fields: &JobFields,
    ) -> Result<Option<Job>, AppError>;
    async fn delete_job(&self, id: i32) -> Result<bool, AppError>;
    /// Counts per status present in scope. Statuses with no jobs are omitted.
    async fn count_jobs_by_status(&self, scope: Scope) -> Result<Vec<(JobStatus, i64)>, AppError>;

    // ── candidates ─────────────────────────────────────────────────────────
    async fn list_candidates(&self, scope: Scope) -> Result<Vec<Candidate>, AppError>;
    async fn find_candidate(&self, id: i32) -> Result<Option<Candidate>, AppError>;
    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, AppError>;
    async fn update_candidate(
        &self,
        id: i32,
        fields: &CandidateFields,
    ) -> Result<Option<Candidate>, AppError>;
    async fn set_candidate_resume(
        &self,
        id: i32,
        resume_path: &str,
    ) -> Result<Option<Candidate>, AppError>;
    async fn delete_candidate(&self, id: i32) -> Result<bool, AppError>;
}
