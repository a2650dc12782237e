use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::filter::{CandidateFilter, CandidateView};
use crate::candidates::stage::CandidateStage;
use crate::candidates::{
    fetch_all_candidates, submit_application, update_candidate_status, ApplicationRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateStatusUpdate {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateStatusResponse {
    pub id: Uuid,
    pub status: String,
    pub stage: CandidateStage,
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Result<Json<Vec<CandidateView>>, AppError> {
    let candidates = fetch_all_candidates(state.store.as_ref()).await?;
    Ok(Json(
        candidates
            .into_iter()
            .filter(|c| filter.matches(c))
            .map(CandidateView::from)
            .collect(),
    ))
}

/// POST /api/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<CandidateView>), AppError> {
    let candidate = submit_application(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(CandidateView::from(candidate))))
}

/// PATCH /api/candidates/:department/:id/status
pub async fn handle_update_candidate_status(
    State(state): State<AppState>,
    Path((department, candidate_id)): Path<(String, Uuid)>,
    Json(update): Json<CandidateStatusUpdate>,
) -> Result<Json<CandidateStatusResponse>, AppError> {
    let status =
        update_candidate_status(state.store.as_ref(), &department, candidate_id, &update.status)
            .await?;
    Ok(Json(CandidateStatusResponse {
        id: candidate_id,
        stage: CandidateStage::classify(&status),
        status,
    }))
}
