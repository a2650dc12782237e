use serde::Deserialize;

use crate::jobs::filter::active;
use crate::models::interview::Interview;

#[derive(Debug, Default, Deserialize)]
pub struct InterviewFilter {
    /// Matches candidate name, job title or interviewer.
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
}

impl InterviewFilter {
    pub fn matches(&self, interview: &Interview) -> bool {
        let search_ok = active(&self.search).map_or(true, |term| {
            let term = term.to_lowercase();
            [
                &interview.candidate_name,
                &interview.job_title,
                &interview.interviewer,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
        });
        let status_ok = active(&self.status)
            .map_or(true, |s| interview.status.as_str().eq_ignore_ascii_case(s));
        let type_ok = active(&self.interview_type)
            .map_or(true, |t| interview.interview_type.eq_ignore_ascii_case(t));
        search_ok && status_ok && type_ok
    }
}
