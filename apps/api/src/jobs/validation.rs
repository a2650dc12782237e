use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobStatus};

const DEFAULT_COMPANY: &str = "Talent Hub";
const DEFAULT_CURRENCY: &str = "USD";
const REMOTE: &str = "remote";

/// The new-job form as submitted by the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJobRequest {
    pub title: String,
    pub company: Option<String>,
    pub department: String,
    pub location: String,
    pub job_type: String,
    pub work_arrangement: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub experience_level: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub application_deadline: Option<String>,
    pub is_urgent: bool,
    pub requires_cover_letter: bool,
    pub requires_portfolio: bool,
    pub skills: Vec<String>,
    pub benefits: Vec<String>,
}

impl NewJobRequest {
    /// Validates required fields and normalizes the form into a stored job.
    pub fn into_job(
        self,
        id: Uuid,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> Result<Job, AppError> {
        let department = self.department.trim().to_string();
        if department.is_empty() {
            return Err(AppError::Validation(
                "Department is required to categorize the job.".to_string(),
            ));
        }

        let is_remote = self.work_arrangement.trim().eq_ignore_ascii_case(REMOTE);
        let location = if is_remote && self.location.trim().is_empty() {
            "Remote".to_string()
        } else {
            self.location.trim().to_string()
        };
        let company = self
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

        let required = [
            ("Title", &self.title),
            ("Location", &location),
            ("Job Type", &self.job_type),
            ("Work Arrangement", &self.work_arrangement),
            ("Experience Level", &self.experience_level),
            ("Description", &self.description),
            ("Requirements", &self.requirements),
            ("Responsibilities", &self.responsibilities),
        ];
        if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::Validation(format!("{label} is required.")));
        }

        validate_salary(self.salary_min, self.salary_max)?;

        Ok(Job {
            id,
            department,
            title: self.title.trim().to_string(),
            company,
            location,
            job_type: self.job_type.trim().to_string(),
            work_arrangement: self.work_arrangement.trim().to_string(),
            is_remote,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            salary_currency: self
                .salary_currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            experience_level: self.experience_level.trim().to_string(),
            description: self.description,
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            application_deadline: self.application_deadline.filter(|d| !d.trim().is_empty()),
            is_urgent: self.is_urgent,
            requires_cover_letter: self.requires_cover_letter,
            requires_portfolio: self.requires_portfolio,
            skills: normalize_skills(self.skills),
            benefits: normalize_skills(self.benefits),
            status,
            created_at: now,
            updated_at: now,
        })
    }
}

fn validate_salary(min: Option<f64>, max: Option<f64>) -> Result<(), AppError> {
    for value in [min, max].into_iter().flatten() {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::Validation(
                "Salary must be a non-negative number.".to_string(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::Validation(
                "Minimum salary cannot exceed maximum salary.".to_string(),
            ));
        }
    }
    Ok(())
}

/// Trims entries, drops blanks and keeps the first occurrence of each.
pub fn normalize_skills(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for skill in raw {
        let skill = skill.trim();
        if !skill.is_empty() && !out.iter().any(|s| s == skill) {
            out.push(skill.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> NewJobRequest {
        NewJobRequest {
            title: "Backend Engineer".to_string(),
            department: "backend".to_string(),
            location: "Berlin".to_string(),
            job_type: "full-time".to_string(),
            work_arrangement: "hybrid".to_string(),
            experience_level: "mid".to_string(),
            description: "Build services".to_string(),
            requirements: "Rust".to_string(),
            responsibilities: "Ship things".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_department_is_required() {
        let form = NewJobRequest {
            department: "  ".to_string(),
            ..complete_form()
        };
        let err = form
            .into_job(Uuid::new_v4(), JobStatus::Published, Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("Department is required"));
    }

    #[test]
    fn test_missing_field_named_in_error() {
        let form = NewJobRequest {
            responsibilities: String::new(),
            ..complete_form()
        };
        let err = form
            .into_job(Uuid::new_v4(), JobStatus::Published, Utc::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Responsibilities is required.");
    }

    #[test]
    fn test_remote_fills_location() {
        let form = NewJobRequest {
            location: String::new(),
            work_arrangement: "remote".to_string(),
            ..complete_form()
        };
        let job = form
            .into_job(Uuid::new_v4(), JobStatus::Draft, Utc::now())
            .unwrap();
        assert!(job.is_remote);
        assert_eq!(job.location, "Remote");
        assert_eq!(job.company, "Talent Hub");
        assert_eq!(job.salary_currency, "USD");
    }

    #[test]
    fn test_inverted_salary_range_rejected() {
        let form = NewJobRequest {
            salary_min: Some(150_000.0),
            salary_max: Some(100_000.0),
            ..complete_form()
        };
        assert!(form
            .into_job(Uuid::new_v4(), JobStatus::Published, Utc::now())
            .is_err());
    }

    #[test]
    fn test_skills_trimmed_and_deduplicated() {
        let skills = vec![
            " Rust ".to_string(),
            "SQL".to_string(),
            "Rust".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalize_skills(skills), vec!["Rust", "SQL"]);
    }
}
