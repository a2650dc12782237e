use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{candidate_not_found, AtsStore};
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::department::Department;
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::{Job, JobStatus};

/// Postgres-backed document store. Each partition level is its own table;
/// see `migrations/0001_document_store.sql`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AtsStore for PgStore {
    async fn job_departments(&self) -> Result<Vec<String>, AppError> {
        Ok(
            sqlx::query_scalar("SELECT value FROM job_categories ORDER BY value")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn upsert_job_department(&self, department: &Department) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO job_categories (value, name, last_activity_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (value) DO UPDATE
                SET name = EXCLUDED.name, last_activity_at = EXCLUDED.last_activity_at
            "#,
        )
        .bind(&department.value)
        .bind(&department.name)
        .bind(department.last_activity_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn jobs_in(&self, department: &str) -> Result<Vec<Job>, AppError> {
        Ok(
            sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE department = $1")
                .bind(department)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn job(&self, department: &str, job_id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(
            sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE department = $1 AND id = $2")
                .bind(department)
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_job(&self, job: &Job) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, department, title, company, location, job_type, work_arrangement,
                 is_remote, salary_min, salary_max, salary_currency, experience_level,
                 description, requirements, responsibilities, application_deadline,
                 is_urgent, requires_cover_letter, requires_portfolio, skills, benefits,
                 status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
        )
        .bind(job.id)
        .bind(&job.department)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.work_arrangement)
        .bind(job.is_remote)
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(&job.salary_currency)
        .bind(&job.experience_level)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(&job.application_deadline)
        .bind(job.is_urgent)
        .bind(job.requires_cover_letter)
        .bind(job.requires_portfolio)
        .bind(&job.skills)
        .bind(&job.benefits)
        .bind(job.status.as_str())
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Inserted jobCategories/{}/jobs/{}", job.department, job.id);
        Ok(())
    }

    async fn set_job_status(
        &self,
        department: &str,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE jobs SET status = $1, updated_at = NOW() WHERE department = $2 AND id = $3",
        )
        .bind(status.as_str())
        .bind(department)
        .bind(job_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn candidate_departments(&self) -> Result<Vec<String>, AppError> {
        Ok(
            sqlx::query_scalar("SELECT value FROM candidate_categories ORDER BY value")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn upsert_candidate_department(&self, department: &Department) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO candidate_categories (value, name, last_activity_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (value) DO UPDATE
                SET name = EXCLUDED.name, last_activity_at = EXCLUDED.last_activity_at
            "#,
        )
        .bind(&department.value)
        .bind(&department.name)
        .bind(department.last_activity_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn candidates_in(&self, department: &str) -> Result<Vec<Candidate>, AppError> {
        Ok(sqlx::query_as::<_, Candidate>(
            "SELECT * FROM candidates WHERE department_applied = $1",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn candidates_for_job(
        &self,
        department: &str,
        job_id: Uuid,
    ) -> Result<Vec<Candidate>, AppError> {
        Ok(sqlx::query_as::<_, Candidate>(
            "SELECT * FROM candidates WHERE department_applied = $1 AND job_id_applied = $2",
        )
        .bind(department)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO candidates
                (id, department_applied, full_name, email, phone, experience_level_applied,
                 job_id_applied, linked_in, portfolio, resume_url, original_file_name,
                 cover_letter, submitted_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.department_applied)
        .bind(&candidate.full_name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.experience_level_applied)
        .bind(candidate.job_id_applied)
        .bind(&candidate.linked_in)
        .bind(&candidate.portfolio)
        .bind(&candidate.resume_url)
        .bind(&candidate.original_file_name)
        .bind(&candidate.cover_letter)
        .bind(candidate.submitted_at)
        .bind(&candidate.status)
        .execute(&self.pool)
        .await?;

        debug!(
            "Inserted candidateCategories/{}/candidates/{}",
            candidate.department_applied, candidate.id
        );
        Ok(())
    }

    async fn set_candidate_status(
        &self,
        department: &str,
        candidate_id: Uuid,
        status: &str,
    ) -> Result<Option<String>, AppError> {
        // The CTE reads the pre-update row, so the old status comes back.
        Ok(sqlx::query_scalar(
            r#"
            WITH previous AS (
                SELECT status FROM candidates
                WHERE department_applied = $2 AND id = $3
                FOR UPDATE
            )
            UPDATE candidates SET status = $1
            FROM previous
            WHERE candidates.department_applied = $2 AND candidates.id = $3
            RETURNING previous.status
            "#,
        )
        .bind(status)
        .bind(department)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn interviews(&self) -> Result<Vec<Interview>, AppError> {
        Ok(sqlx::query_as::<_, Interview>(
            "SELECT * FROM interviews ORDER BY interview_timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn schedule_interview(
        &self,
        interview: &Interview,
        candidate_status: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE candidates SET status = $1 WHERE department_applied = $2 AND id = $3",
        )
        .bind(candidate_status)
        .bind(&interview.department_id)
        .bind(interview.candidate_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(candidate_not_found(
                &interview.department_id,
                interview.candidate_id,
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, candidate_id, candidate_name, candidate_email, department_id, job_id,
                 job_title, interviewer, interview_timestamp, interview_date, interview_time,
                 duration, interview_type, interview_format, location_or_link, notes,
                 status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(interview.id)
        .bind(interview.candidate_id)
        .bind(&interview.candidate_name)
        .bind(&interview.candidate_email)
        .bind(&interview.department_id)
        .bind(interview.job_id)
        .bind(&interview.job_title)
        .bind(&interview.interviewer)
        .bind(interview.interview_timestamp)
        .bind(&interview.interview_date)
        .bind(&interview.interview_time)
        .bind(&interview.duration)
        .bind(&interview.interview_type)
        .bind(&interview.interview_format)
        .bind(&interview.location_or_link)
        .bind(&interview.notes)
        .bind(interview.status.as_str())
        .bind(interview.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn set_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE interviews SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(interview_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
