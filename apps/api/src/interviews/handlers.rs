use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::filter::InterviewFilter;
use crate::interviews::{
    schedule_interview, summarize, update_interview_status, InterviewSummary,
    ScheduleInterviewRequest,
};
use crate::models::interview::{Interview, InterviewStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InterviewListResponse {
    pub interviews: Vec<Interview>,
    /// Computed over all interviews, before filtering.
    pub summary: InterviewSummary,
}

#[derive(Debug, Deserialize)]
pub struct InterviewStatusUpdate {
    pub status: InterviewStatus,
}

/// GET /api/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(filter): Query<InterviewFilter>,
) -> Result<Json<InterviewListResponse>, AppError> {
    let all = state.store.interviews().await?;
    let summary = summarize(&all, Utc::now().date_naive());
    let interviews = all.into_iter().filter(|i| filter.matches(i)).collect();
    Ok(Json(InterviewListResponse {
        interviews,
        summary,
    }))
}

/// POST /api/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), AppError> {
    let interview = schedule_interview(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// PATCH /api/interviews/:id/status
pub async fn handle_update_interview_status(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(update): Json<InterviewStatusUpdate>,
) -> Result<StatusCode, AppError> {
    update_interview_status(state.store.as_ref(), interview_id, update.status).await?;
    Ok(StatusCode::NO_CONTENT)
}
