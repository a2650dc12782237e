use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::{validate_resume_file, PresignedUpload};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadRequest {
    pub file_name: String,
    pub file_type: String,
    /// Bytes. Checked against the resume limits when the client sends it.
    pub file_size: Option<u64>,
}

/// POST /api/s3-upload
pub async fn handle_presign_upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<PresignedUpload>, AppError> {
    let file_name = request.file_name.trim();
    let file_type = request.file_type.trim();
    if file_name.is_empty() || file_type.is_empty() {
        return Err(AppError::Validation(
            "File name and type are required".to_string(),
        ));
    }
    if let Some(size) = request.file_size {
        validate_resume_file(size, file_type)?;
    }

    let upload = state.uploads.presign_upload(file_name, file_type).await?;
    Ok(Json(upload))
}
