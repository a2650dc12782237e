//! Joins the AI ranking with the locally stored applications for one job.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::matching::client::AiMatchedCandidate;
use crate::models::candidate::Candidate;

const STATUS_UNKNOWN: &str = "N/A";

/// Score band. Thresholds mirror the ones the scoring service uses for its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Best,
    Better,
    Good,
    Weak,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            MatchTier::Best
        } else if score >= 75.0 {
            MatchTier::Better
        } else if score >= 50.0 {
            MatchTier::Good
        } else {
            MatchTier::Weak
        }
    }
}

/// One row of the job-applications view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCandidate {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_applied: String,
    pub experience_level_applied: String,
    pub job_id_applied: String,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
    pub resume_url: String,
    pub original_file_name: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub status: String,
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub match_tier: MatchTier,
    /// False when the service ranked an application this job's partition does not hold.
    pub local_record: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    MatchScore,
    Recent,
    Name,
}

fn filled(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn prefer(primary: &str, fallback: &str) -> String {
    if primary.trim().is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

/// Accepts the timestamp shapes the scoring service has been seen to emit.
pub fn parse_ai_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.and_utc())
        })
}

/// Builds display rows in AI rank order. When an id appears more than once
/// locally, the first stored record wins.
pub fn merge_matches(
    job_id: Uuid,
    applicants: &[Candidate],
    matches: &[AiMatchedCandidate],
) -> Vec<DisplayCandidate> {
    matches
        .iter()
        .map(|ai| {
            let local = applicants
                .iter()
                .find(|c| c.id.to_string() == ai.candidate_id);
            if local.is_none() {
                warn!(
                    "AI ranked candidate {} which is not among job {}'s applications",
                    ai.candidate_id, job_id
                );
            }
            merge_one(job_id, local, ai)
        })
        .collect()
}

fn merge_one(job_id: Uuid, local: Option<&Candidate>, ai: &AiMatchedCandidate) -> DisplayCandidate {
    let ai_phone = filled(ai.phone.as_deref());
    let ai_linked_in = filled(ai.linked_in.as_deref());
    let ai_portfolio = filled(ai.portfolio.as_deref());

    let (phone, linked_in, portfolio, original_file_name, submitted_at, local_status) = match local
    {
        Some(c) => (
            filled(c.phone.as_deref()).or(ai_phone),
            filled(c.linked_in.as_deref()).or(ai_linked_in),
            filled(c.portfolio.as_deref()).or(ai_portfolio),
            filled(c.original_file_name.as_deref()),
            Some(c.submitted_at),
            filled(Some(&c.status)),
        ),
        None => (
            ai_phone,
            ai_linked_in,
            ai_portfolio,
            None,
            ai.submitted_at.as_deref().and_then(parse_ai_timestamp),
            None,
        ),
    };

    let status = local_status
        .or_else(|| filled(ai.status.as_deref()))
        .unwrap_or_else(|| STATUS_UNKNOWN.to_string());

    DisplayCandidate {
        id: ai.candidate_id.clone(),
        full_name: prefer(&ai.name, local.map_or("", |c| c.full_name.as_str())),
        email: prefer(&ai.email, local.map_or("", |c| c.email.as_str())),
        phone,
        department_applied: prefer(
            &ai.department_applied,
            local.map_or("", |c| c.department_applied.as_str()),
        ),
        experience_level_applied: prefer(
            &ai.experience_level_applied,
            local.map_or("", |c| c.experience_level_applied.as_str()),
        ),
        job_id_applied: local.map_or(job_id, |c| c.job_id_applied).to_string(),
        linked_in,
        portfolio,
        resume_url: prefer(&ai.resume_url, local.map_or("", |c| c.resume_url.as_str())),
        original_file_name,
        submitted_at,
        status,
        match_score: ai.score_out_of_100,
        matched_keywords: ai.matched_keywords.clone(),
        match_tier: MatchTier::from_score(ai.score_out_of_100),
        local_record: local.is_some(),
    }
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Collator-style comparison: base letters, then accents (unaccented first),
/// then case (lowercase first).
fn by_name(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

pub fn sort_candidates(candidates: &mut [DisplayCandidate], key: SortKey) {
    match key {
        SortKey::MatchScore => candidates.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        }),
        // `None` sorts below every date, so unknown dates land last.
        SortKey::Recent => candidates.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
        SortKey::Name => candidates.sort_by(|a, b| by_name(&a.full_name, &b.full_name)),
    }
}
