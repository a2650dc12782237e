use serde::{Deserialize, Serialize};

use crate::candidates::stage::CandidateStage;
use crate::jobs::filter::active;
use crate::labels::department_label;
use crate::models::candidate::Candidate;

#[derive(Debug, Default, Deserialize)]
pub struct CandidateFilter {
    /// Matches name or email.
    pub search: Option<String>,
    /// A department slug or a job id.
    pub job: Option<String>,
    /// Compared against the raw status, case-insensitively.
    pub stage: Option<String>,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let search_ok = active(&self.search).map_or(true, |term| {
            let term = term.to_lowercase();
            candidate.full_name.to_lowercase().contains(&term)
                || candidate.email.to_lowercase().contains(&term)
        });
        let job_ok = active(&self.job).map_or(true, |job| {
            candidate.department_applied == job || candidate.job_id_applied.to_string() == job
        });
        let stage_ok =
            active(&self.stage).map_or(true, |stage| candidate.status.eq_ignore_ascii_case(stage));
        search_ok && job_ok && stage_ok
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub department_label: String,
    pub stage: CandidateStage,
}

impl From<Candidate> for CandidateView {
    fn from(candidate: Candidate) -> Self {
        Self {
            department_label: department_label(&candidate.department_applied),
            stage: CandidateStage::classify(&candidate.status),
            candidate,
        }
    }
}
