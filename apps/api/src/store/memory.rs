use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{candidate_not_found, AtsStore};
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::department::Department;
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::{Job, JobStatus};

struct Partition<T> {
    meta: Option<Department>,
    docs: BTreeMap<Uuid, T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            meta: None,
            docs: BTreeMap::new(),
        }
    }
}

#[derive(Default)]
struct Collections {
    job_categories: BTreeMap<String, Partition<Job>>,
    candidate_categories: BTreeMap<String, Partition<Candidate>>,
    interviews: BTreeMap<Uuid, Interview>,
}

/// In-process document store. Partitions iterate in slug order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn merge_meta(slot: &mut Option<Department>, department: &Department) {
    match slot {
        Some(existing) => {
            existing.name = department.name.clone();
            existing.last_activity_at = department.last_activity_at;
        }
        None => *slot = Some(department.clone()),
    }
}

/// A partition is only listed once its parent document exists, even if
/// documents were written beneath it.
fn listed<T>(partitions: &BTreeMap<String, Partition<T>>) -> Vec<String> {
    partitions
        .iter()
        .filter(|(_, p)| p.meta.is_some())
        .map(|(slug, _)| slug.clone())
        .collect()
}

#[async_trait]
impl AtsStore for MemoryStore {
    async fn job_departments(&self) -> Result<Vec<String>, AppError> {
        Ok(listed(&self.inner.read().await.job_categories))
    }

    async fn upsert_job_department(&self, department: &Department) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let partition = inner
            .job_categories
            .entry(department.value.clone())
            .or_default();
        merge_meta(&mut partition.meta, department);
        Ok(())
    }

    async fn jobs_in(&self, department: &str) -> Result<Vec<Job>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .job_categories
            .get(department)
            .map(|p| p.docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn job(&self, department: &str, job_id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .job_categories
            .get(department)
            .and_then(|p| p.docs.get(&job_id).cloned()))
    }

    async fn insert_job(&self, job: &Job) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner
            .job_categories
            .entry(job.department.clone())
            .or_default()
            .docs
            .insert(job.id, job.clone());
        Ok(())
    }

    async fn set_job_status(
        &self,
        department: &str,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let job = inner
            .job_categories
            .get_mut(department)
            .and_then(|p| p.docs.get_mut(&job_id));
        Ok(match job {
            Some(job) => {
                job.status = status;
                job.updated_at = chrono::Utc::now();
                true
            }
            None => false,
        })
    }

    async fn candidate_departments(&self) -> Result<Vec<String>, AppError> {
        Ok(listed(&self.inner.read().await.candidate_categories))
    }

    async fn upsert_candidate_department(&self, department: &Department) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let partition = inner
            .candidate_categories
            .entry(department.value.clone())
            .or_default();
        merge_meta(&mut partition.meta, department);
        Ok(())
    }

    async fn candidates_in(&self, department: &str) -> Result<Vec<Candidate>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .candidate_categories
            .get(department)
            .map(|p| p.docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn candidates_for_job(
        &self,
        department: &str,
        job_id: Uuid,
    ) -> Result<Vec<Candidate>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .candidate_categories
            .get(department)
            .map(|p| {
                p.docs
                    .values()
                    .filter(|c| c.job_id_applied == job_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner
            .candidate_categories
            .entry(candidate.department_applied.clone())
            .or_default()
            .docs
            .insert(candidate.id, candidate.clone());
        Ok(())
    }

    async fn set_candidate_status(
        &self,
        department: &str,
        candidate_id: Uuid,
        status: &str,
    ) -> Result<Option<String>, AppError> {
        let mut inner = self.inner.write().await;
        let candidate = inner
            .candidate_categories
            .get_mut(department)
            .and_then(|p| p.docs.get_mut(&candidate_id));
        Ok(candidate.map(|c| std::mem::replace(&mut c.status, status.to_string())))
    }

    async fn interviews(&self) -> Result<Vec<Interview>, AppError> {
        let mut interviews: Vec<Interview> =
            self.inner.read().await.interviews.values().cloned().collect();
        interviews.sort_by(|a, b| b.interview_timestamp.cmp(&a.interview_timestamp));
        Ok(interviews)
    }

    async fn schedule_interview(
        &self,
        interview: &Interview,
        candidate_status: &str,
    ) -> Result<(), AppError> {
        // One write guard covers both documents.
        let mut inner = self.inner.write().await;
        let candidate = inner
            .candidate_categories
            .get_mut(&interview.department_id)
            .and_then(|p| p.docs.get_mut(&interview.candidate_id))
            .ok_or_else(|| candidate_not_found(&interview.department_id, interview.candidate_id))?;
        candidate.status = candidate_status.to_string();
        inner.interviews.insert(interview.id, interview.clone());
        Ok(())
    }

    async fn set_interview_status(
        &self,
        interview_id: Uuid,
        status: InterviewStatus,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        Ok(match inner.interviews.get_mut(&interview_id) {
            Some(interview) => {
                interview.status = status;
                true
            }
            None => false,
        })
    }
}
