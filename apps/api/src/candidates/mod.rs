//! Applications: partitioned fetch, portal submission and status overwrites.

pub mod filter;
pub mod handlers;
pub mod stage;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::stage::CandidateStage;
use crate::errors::AppError;
use crate::models::candidate::{Candidate, STATUS_RECEIVED};
use crate::models::department::Department;
use crate::models::job::JobStatus;
use crate::store::AtsStore;

/// Reads every candidate partition in turn, newest submission first.
pub async fn fetch_all_candidates(store: &dyn AtsStore) -> Result<Vec<Candidate>, AppError> {
    let mut candidates = Vec::new();
    for department in store.candidate_departments().await? {
        candidates.extend(store.candidates_in(&department).await?);
    }
    candidates.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(candidates)
}

/// Application form from the public candidate portal. `resumeUrl` is the
/// `finalUrl` handed out by the upload broker.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub experience_level: String,
    pub job_id: Option<Uuid>,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
    pub resume_url: String,
    pub original_file_name: Option<String>,
    pub cover_letter: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn submit_application(
    store: &dyn AtsStore,
    request: ApplicationRequest,
) -> Result<Candidate, AppError> {
    let required = [
        ("Full name", &request.full_name),
        ("Email", &request.email),
        ("Department", &request.department),
        ("Experience level", &request.experience_level),
        ("Resume", &request.resume_url),
    ];
    if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(AppError::Validation(format!("{label} is required.")));
    }
    if !request.email.contains('@') {
        return Err(AppError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    let job_id = request
        .job_id
        .ok_or_else(|| AppError::Validation("Position is required.".to_string()))?;

    let department = request.department.trim().to_string();
    let job = store
        .job(&department, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;
    if job.status != JobStatus::Published {
        return Err(AppError::Validation(
            "This position is not accepting applications.".to_string(),
        ));
    }

    let now = Utc::now();
    let candidate = Candidate {
        id: Uuid::new_v4(),
        full_name: request.full_name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: non_blank(request.phone),
        department_applied: department,
        experience_level_applied: request.experience_level.trim().to_string(),
        job_id_applied: job_id,
        linked_in: non_blank(request.linked_in),
        portfolio: non_blank(request.portfolio),
        resume_url: request.resume_url.trim().to_string(),
        original_file_name: non_blank(request.original_file_name),
        cover_letter: non_blank(request.cover_letter),
        submitted_at: now,
        status: STATUS_RECEIVED.to_string(),
    };

    store
        .upsert_candidate_department(&Department::touch(&candidate.department_applied, now))
        .await?;
    store.insert_candidate(&candidate).await?;

    info!(
        "Application {} received for job {} in '{}'",
        candidate.id, job_id, candidate.department_applied
    );
    Ok(candidate)
}

/// Overwrites a candidate's status. Any transition is accepted, including
/// moves out of hired/rejected, which are logged.
pub async fn update_candidate_status(
    store: &dyn AtsStore,
    department: &str,
    candidate_id: Uuid,
    status: &str,
) -> Result<String, AppError> {
    let status = status.trim();
    if status.is_empty() {
        return Err(AppError::Validation("Status is required.".to_string()));
    }

    let previous = store
        .set_candidate_status(department, candidate_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    if CandidateStage::classify(&previous).is_terminal()
        && CandidateStage::classify(status) != CandidateStage::classify(&previous)
    {
        warn!("Candidate {candidate_id} moved out of terminal status '{previous}' to '{status}'");
    } else {
        info!("Candidate {candidate_id} status '{previous}' -> '{status}'");
    }
    Ok(status.to_string())
}
