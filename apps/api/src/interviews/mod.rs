//! Interview scheduling. Writing an interview also moves the candidate to
//! "Interview Scheduled"; the store applies both writes as one unit.

pub mod filter;
pub mod handlers;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::STATUS_INTERVIEW_SCHEDULED;
use crate::models::interview::{Interview, InterviewStatus};
use crate::store::AtsStore;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleInterviewRequest {
    pub candidate_id: Option<Uuid>,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub department_id: String,
    pub job_id: Option<Uuid>,
    pub job_title: String,
    pub interviewer: String,
    /// `YYYY-MM-DD`
    pub interview_date: String,
    /// `HH:MM`, 24-hour
    pub interview_time: String,
    pub duration: String,
    pub interview_type: String,
    pub interview_format: String,
    pub location_or_link: String,
    pub notes: Option<String>,
}

fn parse_slot(date: &str, time: &str) -> Result<DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid interview date '{date}'")))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid interview time '{time}'")))?;
    Ok(date.and_time(time).and_utc())
}

pub async fn schedule_interview(
    store: &dyn AtsStore,
    request: ScheduleInterviewRequest,
) -> Result<Interview, AppError> {
    let candidate_id = request
        .candidate_id
        .ok_or_else(|| AppError::Validation("Candidate is required.".to_string()))?;
    let job_id = request
        .job_id
        .ok_or_else(|| AppError::Validation("Job is required.".to_string()))?;

    let required = [
        ("Candidate name", &request.candidate_name),
        ("Department", &request.department_id),
        ("Job title", &request.job_title),
        ("Interviewer", &request.interviewer),
        ("Interview date", &request.interview_date),
        ("Interview time", &request.interview_time),
        ("Duration", &request.duration),
        ("Interview type", &request.interview_type),
        ("Interview format", &request.interview_format),
        ("Location or link", &request.location_or_link),
    ];
    if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(AppError::Validation(format!("{label} is required.")));
    }

    let interview_timestamp = parse_slot(&request.interview_date, &request.interview_time)?;

    let interview = Interview {
        id: Uuid::new_v4(),
        candidate_id,
        candidate_name: request.candidate_name.trim().to_string(),
        candidate_email: request.candidate_email.filter(|e| !e.trim().is_empty()),
        department_id: request.department_id.trim().to_string(),
        job_id,
        job_title: request.job_title.trim().to_string(),
        interviewer: request.interviewer.trim().to_string(),
        interview_timestamp,
        interview_date: request.interview_date.trim().to_string(),
        interview_time: request.interview_time.trim().to_string(),
        duration: request.duration,
        interview_type: request.interview_type,
        interview_format: request.interview_format,
        location_or_link: request.location_or_link,
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        status: InterviewStatus::Scheduled,
        created_at: Utc::now(),
    };

    store
        .schedule_interview(&interview, STATUS_INTERVIEW_SCHEDULED)
        .await?;

    info!(
        "Interview {} scheduled for candidate {} at {}",
        interview.id, candidate_id, interview.interview_timestamp
    );
    Ok(interview)
}

/// Counters shown above the interview list.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    pub today: usize,
    pub scheduled: usize,
    pub completed: usize,
}

pub fn summarize(interviews: &[Interview], today: NaiveDate) -> InterviewSummary {
    let mut summary = InterviewSummary::default();
    for interview in interviews {
        match interview.status {
            InterviewStatus::Scheduled => {
                summary.scheduled += 1;
                if interview.interview_timestamp.date_naive() == today {
                    summary.today += 1;
                }
            }
            InterviewStatus::Completed => summary.completed += 1,
            _ => {}
        }
    }
    summary
}

pub async fn update_interview_status(
    store: &dyn AtsStore,
    interview_id: Uuid,
    status: InterviewStatus,
) -> Result<(), AppError> {
    if !store.set_interview_status(interview_id, status).await? {
        return Err(AppError::NotFound(format!(
            "Interview {interview_id} not found"
        )));
    }
    info!("Interview {interview_id} marked {status}");
    Ok(())
}
