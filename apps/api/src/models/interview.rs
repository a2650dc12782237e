use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UnknownStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "Scheduled",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Cancelled => "Cancelled",
            InterviewStatus::Rescheduled => "Rescheduled",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" | "canceled" => Ok(InterviewStatus::Cancelled),
            "rescheduled" => Ok(InterviewStatus::Rescheduled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for InterviewStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An interview stored in the flat `interviewCollections` collection.
/// Candidate and job fields are denormalized copies; nothing enforces that they still exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub department_id: String,
    pub job_id: Uuid,
    pub job_title: String,
    pub interviewer: String,
    pub interview_timestamp: DateTime<Utc>,
    pub interview_date: String,
    pub interview_time: String,
    pub duration: String,
    pub interview_type: String,
    pub interview_format: String,
    pub location_or_link: String,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
}
