//! Resume upload broker. Browsers upload straight to the bucket with a
//! short-lived presigned PUT; the service never sees the file bytes.

pub mod handlers;

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

const UPLOAD_URL_TTL: Duration = Duration::from_secs(300);
const RESUME_PREFIX: &str = "resumes";

/// Largest accepted resume, inclusive.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const ALLOWED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    pub upload_url: String,
    pub key: String,
    /// Public object URL, stored as the candidate's `resumeUrl`.
    pub final_url: String,
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn validate_resume_file(size: u64, content_type: &str) -> Result<(), AppError> {
    if size > MAX_RESUME_BYTES {
        return Err(AppError::Validation(
            "File size must be less than 5MB".to_string(),
        ));
    }
    if !ALLOWED_RESUME_TYPES.contains(&content_type) {
        return Err(AppError::Validation(
            "Please upload a PDF or Word document".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UploadBroker {
    s3: S3Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl UploadBroker {
    pub fn new(s3: S3Client, bucket: String, region: String, endpoint: Option<String>) -> Self {
        Self {
            s3,
            bucket,
            region,
            endpoint: endpoint.map(|e| e.trim_end_matches('/').to_string()),
        }
    }

    fn final_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/{}/{key}", self.bucket),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{key}",
                self.bucket, self.region
            ),
        }
    }

    /// Signs a PUT for a fresh object key. The upload must send the same Content-Type.
    pub async fn presign_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<PresignedUpload, AppError> {
        let key = format!(
            "{RESUME_PREFIX}/{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(file_name)
        );

        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL)
            .map_err(|e| AppError::Internal(e.into()))?;
        let request = self
            .s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::S3(e.to_string()))?;

        info!("Presigned resume upload {key} ({content_type})");
        Ok(PresignedUpload {
            upload_url: request.uri().to_string(),
            final_url: self.final_url(&key),
            key,
        })
    }
}
