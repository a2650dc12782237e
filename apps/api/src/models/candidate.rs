use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status written on every new application.
pub const STATUS_RECEIVED: &str = "Received";
/// Status written alongside a scheduled interview.
pub const STATUS_INTERVIEW_SCHEDULED: &str = "Interview Scheduled";

/// An application stored under `candidateCategories/{department}/candidates/{id}`.
///
/// `status` is free-form; see `candidates::stage` for how it is classified.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_applied: String,
    pub experience_level_applied: String,
    pub job_id_applied: Uuid,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
    pub resume_url: String,
    pub original_file_name: Option<String>,
    pub cover_letter: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}
