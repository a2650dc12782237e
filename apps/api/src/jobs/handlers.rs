use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filter::{JobFilter, JobView};
use crate::jobs::{create_job, fetch_all_jobs, find_job, update_job_status, NewJobRequest};
use crate::models::job::JobStatus;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub save_as_draft: bool,
    #[serde(flatten)]
    pub form: NewJobRequest,
}

#[derive(Debug, Deserialize)]
pub struct JobStatusUpdate {
    pub status: JobStatus,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let jobs = fetch_all_jobs(state.store.as_ref()).await?;
    Ok(Json(
        jobs.into_iter()
            .filter(|job| filter.matches(job))
            .map(JobView::from)
            .collect(),
    ))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobView>, AppError> {
    let job = find_job(state.store.as_ref(), job_id).await?;
    Ok(Json(JobView::from(job)))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobView>), AppError> {
    let job = create_job(state.store.as_ref(), request.form, request.save_as_draft).await?;
    Ok((StatusCode::CREATED, Json(JobView::from(job))))
}

/// PATCH /api/jobs/:id/status
pub async fn handle_update_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(update): Json<JobStatusUpdate>,
) -> Result<Json<JobView>, AppError> {
    let job = update_job_status(state.store.as_ref(), job_id, update.status).await?;
    Ok(Json(JobView::from(job)))
}
