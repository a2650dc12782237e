//! Dashboard overview and reference data.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::candidates::fetch_all_candidates;
use crate::candidates::filter::CandidateView;
use crate::errors::AppError;
use crate::jobs::fetch_all_jobs;
use crate::jobs::filter::JobView;
use crate::labels::{department_labels, Label};
use crate::models::candidate::Candidate;
use crate::models::job::{Job, JobStatus};
use crate::state::AppState;

const RECENT_APPLICATIONS: usize = 4;
const FEATURED_JOBS: usize = 4;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_applications: usize,
    pub active_jobs: usize,
    pub recent_applications: Vec<CandidateView>,
    pub open_positions: Vec<JobView>,
}

/// Expects both lists newest first, as the fetch layer returns them.
pub fn overview(jobs: Vec<Job>, candidates: Vec<Candidate>) -> DashboardOverview {
    let total_applications = candidates.len();
    let recent_applications = candidates
        .into_iter()
        .take(RECENT_APPLICATIONS)
        .map(CandidateView::from)
        .collect();

    let mut published: Vec<Job> = jobs
        .into_iter()
        .filter(|j| j.status == JobStatus::Published)
        .collect();
    let active_jobs = published.len();
    published.sort_by_key(|j| j.title.to_lowercase());

    DashboardOverview {
        total_applications,
        active_jobs,
        recent_applications,
        open_positions: published
            .into_iter()
            .take(FEATURED_JOBS)
            .map(JobView::from)
            .collect(),
    }
}

/// GET /api/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, AppError> {
    let store = state.store.as_ref();
    let jobs = fetch_all_jobs(store).await?;
    let candidates = fetch_all_candidates(store).await?;
    Ok(Json(overview(jobs, candidates)))
}

/// GET /api/departments
pub async fn handle_departments() -> Json<Vec<Label>> {
    Json(department_labels())
}
