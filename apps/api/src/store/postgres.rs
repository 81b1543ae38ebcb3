use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateFields, NewCandidate};
use crate::models::job::{Job, JobFields, JobStatus, NewJob};
use crate::models::user::{NewUser, Role, User, UserSummary};
use crate::store::{Scope, Store};

/// `Store` backed by PostgreSQL. Every method is a single statement, so each
/// runs in its own implicit transaction.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn owner_filter(scope: Scope) -> Option<i32> {
    match scope {
        Scope::All => None,
        Scope::Owner(id) => Some(id),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, password_salt, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Username '{}' already exists", user.username),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        Ok(sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, role FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_user_role(&self, id: i32, role: Role) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_jobs(&self, scope: Scope) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE ($1::INTEGER IS NULL OR owner_id = $1) ORDER BY id",
        )
        .bind(owner_filter(scope))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_job(&self, id: i32) -> Result<Option<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job, AppError> {
        let NewJob {
            owner_id,
            owner_username,
            fields,
        } = job;

        Ok(sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (title, company, location, status, date_applied, salary, notes,
                 contact_name, contact_email, next_steps, candidate_id, candidate_name,
                 owner_id, owner_username, version, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 1, NOW())
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.company)
        .bind(&fields.location)
        .bind(fields.status)
        .bind(fields.date_applied)
        .bind(&fields.salary)
        .bind(&fields.notes)
        .bind(&fields.contact_name)
        .bind(&fields.contact_email)
        .bind(&fields.next_steps)
        .bind(fields.candidate_id)
        .bind(&fields.candidate_name)
        .bind(owner_id)
        .bind(&owner_username)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_job(
        &self,
        id: i32,
        expected_version: i32,
        fields: &JobFields,
    ) -> Result<Option<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                title = $1, company = $2, location = $3, status = $4, date_applied = $5,
                salary = $6, notes = $7, contact_name = $8, contact_email = $9,
                next_steps = $10, candidate_id = $11, candidate_name = $12,
                version = version + 1, last_updated = NOW()
            WHERE id = $13 AND version = $14
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.company)
        .bind(&fields.location)
        .bind(fields.status)
        .bind(fields.date_applied)
        .bind(&fields.salary)
        .bind(&fields.notes)
        .bind(&fields.contact_name)
        .bind(&fields.contact_email)
        .bind(&fields.next_steps)
        .bind(fields.candidate_id)
        .bind(&fields.candidate_name)
        .bind(id)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_job(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_jobs_by_status(&self, scope: Scope) -> Result<Vec<(JobStatus, i64)>, AppError> {
        Ok(sqlx::query_as::<_, (JobStatus, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM jobs
            WHERE ($1::INTEGER IS NULL OR owner_id = $1)
            GROUP BY status
            "#,
        )
        .bind(owner_filter(scope))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_candidates(&self, scope: Scope) -> Result<Vec<Candidate>, AppError> {
        Ok(sqlx::query_as::<_, Candidate>(
            "SELECT * FROM candidates WHERE ($1::INTEGER IS NULL OR owner_id = $1) ORDER BY id",
        )
        .bind(owner_filter(scope))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_candidate(&self, id: i32) -> Result<Option<Candidate>, AppError> {
        Ok(
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, AppError> {
        let NewCandidate {
            owner_id,
            owner_username,
            fields,
        } = candidate;

        Ok(sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates
                (full_name, email, phone, notes, resume_path, owner_id, owner_username,
                 created_at, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.notes)
        .bind(&fields.resume_path)
        .bind(owner_id)
        .bind(&owner_username)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_candidate(
        &self,
        id: i32,
        fields: &CandidateFields,
    ) -> Result<Option<Candidate>, AppError> {
        Ok(sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates SET
                full_name = $1, email = $2, phone = $3, notes = $4, resume_path = $5,
                last_updated = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.notes)
        .bind(&fields.resume_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn set_candidate_resume(
        &self,
        id: i32,
        resume_path: &str,
    ) -> Result<Option<Candidate>, AppError> {
        Ok(sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates SET resume_path = $1, last_updated = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(resume_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_candidate(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
