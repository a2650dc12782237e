use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filter::JobView;
use crate::jobs::find_job;
use crate::matching::merge::{merge_matches, sort_candidates, DisplayCandidate, SortKey};
use crate::matching::{MatchRequest, MatchSummary};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationsQuery {
    #[serde(default)]
    pub sort: SortKey,
}

/// Match results for one job. `error` is set, and the other fields emptied,
/// when the scoring service could not be used.
#[derive(Debug, Serialize)]
pub struct MatchPanel {
    pub candidates: Vec<DisplayCandidate>,
    pub summary: Option<MatchSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationsResponse {
    pub job: JobView,
    pub applicant_count: usize,
    pub matches: MatchPanel,
}

/// GET /api/jobs/:id/applications
///
/// Store failures are HTTP errors. Scoring-service failures are reported in
/// `matches.error` alongside the job.
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<ApplicationsQuery>,
) -> Result<Json<JobApplicationsResponse>, AppError> {
    let job = find_job(state.store.as_ref(), job_id).await?;
    let applicants = state
        .store
        .candidates_for_job(&job.department, job_id)
        .await?;

    let request = MatchRequest::for_job(&job.department, job_id, applicants.len());
    let matches = match state.matcher.match_resumes(&request).await {
        Ok(response) => {
            let mut candidates = merge_matches(job_id, &applicants, &response.all_matched_list);
            sort_candidates(&mut candidates, query.sort);
            MatchPanel {
                candidates,
                summary: Some(response.summary()),
                error: None,
            }
        }
        Err(e) => {
            error!("AI matching failed for job {job_id}: {e}");
            MatchPanel {
                candidates: Vec::new(),
                summary: None,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(Json(JobApplicationsResponse {
        applicant_count: applicants.len(),
        job: JobView::from(job),
        matches,
    }))
}
