//! Job postings: partitioned fetch, lookup, creation and status changes.

pub mod filter;
pub mod handlers;
pub mod validation;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::department::Department;
use crate::models::job::{Job, JobStatus};
use crate::store::AtsStore;

pub use validation::NewJobRequest;

/// Reads every job partition in turn and returns the flattened list, newest first.
/// One failed partition read aborts the whole listing.
pub async fn fetch_all_jobs(store: &dyn AtsStore) -> Result<Vec<Job>, AppError> {
    let mut jobs = Vec::new();
    for department in store.job_departments().await? {
        jobs.extend(store.jobs_in(&department).await?);
    }
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(jobs)
}

/// Finds a job by id without knowing its department, probing partitions in order.
pub async fn find_job(store: &dyn AtsStore, job_id: Uuid) -> Result<Job, AppError> {
    for department in store.job_departments().await? {
        if let Some(job) = store.job(&department, job_id).await? {
            return Ok(job);
        }
    }
    Err(AppError::NotFound("Job not found.".to_string()))
}

/// Validates the form, upserts the department partition document, then writes the job.
pub async fn create_job(
    store: &dyn AtsStore,
    request: NewJobRequest,
    save_as_draft: bool,
) -> Result<Job, AppError> {
    let now = Utc::now();
    let status = if save_as_draft {
        JobStatus::Draft
    } else {
        JobStatus::Published
    };
    let job = request.into_job(Uuid::new_v4(), status, now)?;

    store
        .upsert_job_department(&Department::touch(&job.department, now))
        .await?;
    store.insert_job(&job).await?;

    info!(
        "Job posted with ID {} in department '{}' ({})",
        job.id, job.department, job.status
    );
    Ok(job)
}

pub async fn update_job_status(
    store: &dyn AtsStore,
    job_id: Uuid,
    status: JobStatus,
) -> Result<Job, AppError> {
    let mut job = find_job(store, job_id).await?;
    if !store.set_job_status(&job.department, job_id, status).await? {
        warn!("Job {job_id} disappeared before its status could be set");
        return Err(AppError::NotFound("Job not found.".to_string()));
    }
    info!("Job {job_id} status {} -> {status}", job.status);
    job.status = status;
    Ok(job)
}
