use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateFields, NewCandidate};
use crate::models::job::{Job, JobFields, JobStatus, NewJob};
use crate::models::user::{NewUser, Role, User, UserSummary};
use crate::store::{Scope, Store};

/// In-process `Store` used by handler tests. Mirrors the Postgres semantics:
/// unique usernames, serial ids, version-checked job updates.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    jobs: BTreeMap<i32, Job>,
    candidates: BTreeMap<i32, Candidate>,
    next_id: i32,
}

impl Scope {
    fn includes(&self, owner_id: i32) -> bool {
        match self {
            Scope::All => true,
            Scope::Owner(id) => *id == owner_id,
        }
    }
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    /// Bumps a job's version behind the caller's back, as a concurrent writer would.
    pub fn touch_job(&self, id: i32) {
        if let Some(job) = self.tables().jobs.get_mut(&id) {
            job.version += 1;
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        let id = tables.next_id();
        let row = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            password_salt: user.password_salt,
            role: user.role,
        };
        tables.users.insert(id, row.clone());
        Ok(row)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        Ok(self.tables().users.values().map(UserSummary::from).collect())
    }

    async fn update_user_role(&self, id: i32, role: Role) -> Result<bool, AppError> {
        Ok(match self.tables().users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        })
    }

    async fn delete_user(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables().users.remove(&id).is_some())
    }

    async fn list_jobs(&self, scope: Scope) -> Result<Vec<Job>, AppError> {
        Ok(self
            .tables()
            .jobs
            .values()
            .filter(|j| scope.includes(j.owner_id))
            .cloned()
            .collect())
    }

    async fn find_job(&self, id: i32) -> Result<Option<Job>, AppError> {
        Ok(self.tables().jobs.get(&id).cloned())
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let f = job.fields;
        let row = Job {
            id,
            title: f.title,
            company: f.company,
            location: f.location,
            status: f.status,
            date_applied: f.date_applied,
            salary: f.salary,
            notes: f.notes,
            contact_name: f.contact_name,
            contact_email: f.contact_email,
            next_steps: f.next_steps,
            owner_id: job.owner_id,
            owner_username: job.owner_username,
            candidate_id: f.candidate_id,
            candidate_name: f.candidate_name,
            version: 1,
            last_updated: Utc::now(),
        };
        tables.jobs.insert(id, row.clone());
        Ok(row)
    }

    async fn update_job(
        &self,
        id: i32,
        expected_version: i32,
        fields: &JobFields,
    ) -> Result<Option<Job>, AppError> {
        let mut tables = self.tables();
        let Some(job) = tables.jobs.get_mut(&id) else {
            return Ok(None);
        };
        if job.version != expected_version {
            return Ok(None);
        }
        let f = fields.clone();
        job.title = f.title;
        job.company = f.company;
        job.location = f.location;
        job.status = f.status;
        job.date_applied = f.date_applied;
        job.salary = f.salary;
        job.notes = f.notes;
        job.contact_name = f.contact_name;
        job.contact_email = f.contact_email;
        job.next_steps = f.next_steps;
        job.candidate_id = f.candidate_id;
        job.candidate_name = f.candidate_name;
        job.version += 1;
        job.last_updated = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete_job(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables().jobs.remove(&id).is_some())
    }

    async fn count_jobs_by_status(&self, scope: Scope) -> Result<Vec<(JobStatus, i64)>, AppError> {
        let tables = self.tables();
        let mut counts: Vec<(JobStatus, i64)> = Vec::new();
        for job in tables.jobs.values().filter(|j| scope.includes(j.owner_id)) {
            match counts.iter_mut().find(|(s, _)| *s == job.status) {
                Some((_, n)) => *n += 1,
                None => counts.push((job.status, 1)),
            }
        }
        Ok(counts)
    }

    async fn list_candidates(&self, scope: Scope) -> Result<Vec<Candidate>, AppError> {
        Ok(self
            .tables()
            .candidates
            .values()
            .filter(|c| scope.includes(c.owner_id))
            .cloned()
            .collect())
    }

    async fn find_candidate(&self, id: i32) -> Result<Option<Candidate>, AppError> {
        Ok(self.tables().candidates.get(&id).cloned())
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = Utc::now();
        let f = candidate.fields;
        let row = Candidate {
            id,
            full_name: f.full_name,
            email: f.email,
            phone: f.phone,
            resume_path: f.resume_path,
            notes: f.notes,
            owner_id: candidate.owner_id,
            owner_username: candidate.owner_username,
            created_at: now,
            last_updated: now,
        };
        tables.candidates.insert(id, row.clone());
        Ok(row)
    }

    async fn update_candidate(
        &self,
        id: i32,
        fields: &CandidateFields,
    ) -> Result<Option<Candidate>, AppError> {
        let mut tables = self.tables();
        let Some(c) = tables.candidates.get_mut(&id) else {
            return Ok(None);
        };
        let f = fields.clone();
        c.full_name = f.full_name;
        c.email = f.email;
        c.phone = f.phone;
        c.notes = f.notes;
        c.resume_path = f.resume_path;
        c.last_updated = Utc::now();
        Ok(Some(c.clone()))
    }

    async fn set_candidate_resume(
        &self,
        id: i32,
        resume_path: &str,
    ) -> Result<Option<Candidate>, AppError> {
        let mut tables = self.tables();
        let Some(c) = tables.candidates.get_mut(&id) else {
            return Ok(None);
        };
        c.resume_path = Some(resume_path.to_string());
        c.last_updated = Utc::now();
        Ok(Some(c.clone()))
    }

    async fn delete_candidate(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables().candidates.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fields(title: &str, status: JobStatus) -> JobFields {
        JobFields {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            status,
            date_applied: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            salary: None,
            notes: None,
            contact_name: None,
            contact_email: None,
            next_steps: None,
            candidate_id: None,
            candidate_name: None,
        }
    }

    #[tokio::test]
    async fn test_update_job_rejects_stale_version() {
        let store = MemoryStore::new();
        let job = store
            .insert_job(NewJob {
                owner_id: 1,
                owner_username: None,
                fields: fields("Engineer", JobStatus::Applied),
            })
            .await
            .unwrap();
        assert_eq!(job.version, 1);

        let updated = store
            .update_job(job.id, 1, &fields("Senior Engineer", JobStatus::Interview))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.version, 2);

        let stale = store
            .update_job(job.id, 1, &fields("Staff Engineer", JobStatus::Offer))
            .await
            .unwrap();
        assert!(stale.is_none());
        assert_eq!(
            store.find_job(job.id).await.unwrap().unwrap().title,
            "Senior Engineer"
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        let new_user = || NewUser {
            username: "alice".to_string(),
            password_hash: vec![1],
            password_salt: vec![2],
            role: Role::User,
        };
        store.insert_user(new_user()).await.unwrap();
        let err = store.insert_user(new_user()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
