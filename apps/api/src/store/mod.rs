//! Document store accessor.
//!
//! Mirrors the hierarchical layout the dashboard reads: department partitions
//! for jobs (`jobCategories/{dept}/jobs/{id}`) and applications
//! (`candidateCategories/{dept}/candidates/{id}`), plus the flat
//! `interviewCollections`. Aggregation across partitions is left to callers.
//!
//! `AppState` holds an `Arc<dyn AtsStore>`: `PgStore` in production,
//! `MemoryStore` when no database is configured and in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::department::Department;
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::{Job, JobStatus};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait AtsStore: Send + Sync {
    /// Slugs of every job partition, in store order.
    async fn job_departments(&self) -> Result<Vec<String>, AppError>;

    /// Creates the partition document or merges into the existing one.
    async fn upsert_job_department(&self, department: &Department) -> Result<(), AppError>;

    async fn jobs_in(&self, department: &str) -> Result<Vec<Job>, AppError>;

    async fn job(&self, department: &str, job_id: Uuid) -> Result<Option<Job>, AppError>;

    async fn insert_job(&self, job: &Job) -> Result<(), AppError>;

    /// Returns `false` when no such job exists.
    async fn set_job_status(
        &self,
        department: &str,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<bool, AppError>;

    async fn candidate_departments(&self) -> Result<Vec<String>, AppError>;

    async fn upsert_candidate_department(&self, department: &Department) -> Result<(), AppError>;

    async fn candidates_in(&self, department: &str) -> Result<Vec<Candidate>, AppError>;

    async fn candidates_for_job(
        &self,
        department: &str,
        job_id: Uuid,
    ) -> Result<Vec<Candidate>, AppError>;

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<(), AppError>;

    /// Overwrites the status and returns the previous one, or `None` when no such candidate exists.
    async fn set_candidate_status(
        &self,
        department: &str,
        candidate_id: Uuid,
        status: &str,
    ) -> Result<Option<String>, AppError>;

    /// All interviews, newest `interview_timestamp` first.
    async fn interviews(&self) -> Result<Vec<Interview>, AppError>;

    /// Inserts the interview and sets the candidate's status to `candidate_status`
    /// as one unit. Nothing is written if the candidate does not exist.
    async fn schedule_interview(
        &self,
        interview: &Interview,
        candidate_status: &str,
    ) -> Result<(), AppError>;

    /// Returns `false` when no such interview exists.
    async fn set_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<bool, AppError>;
}

fn candidate_not_found(department: &str, candidate_id: Uuid) -> AppError {
    AppError::NotFound(format!(
        "Candidate {candidate_id} not found in department '{department}'"
    ))
}
