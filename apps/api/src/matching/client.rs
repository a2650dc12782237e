/// AI match client: the only caller of the external resume-scoring service.
///
/// The service owns the ranking algorithm and the best/better/good thresholds;
/// this module only shapes the request and decodes the ranked list.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::matching::cache::MatchCache;

const MATCH_PATH: &str = "/match_resumes";
/// Pool size requested when the job has no applicants yet.
pub const DEFAULT_POOL_SIZE: usize = 5;
const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed AI response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRequest {
    pub category: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub top_n: usize,
}

impl MatchRequest {
    /// Asks for the whole applicant pool, or the default pool size when it is empty.
    pub fn for_job(category: &str, job_id: Uuid, applicant_count: usize) -> Self {
        Self {
            category: category.to_string(),
            job_id: job_id.to_string(),
            top_n: if applicant_count > 0 {
                applicant_count
            } else {
                DEFAULT_POOL_SIZE
            },
        }
    }

    pub fn cache_key(&self) -> String {
        format!("match:{}:{}:{}", self.category, self.job_id, self.top_n)
    }
}

/// One ranked candidate as returned by the service, with denormalized contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMatchedCandidate {
    pub candidate_id: String,
    #[serde(rename = "departmentApplied", default)]
    pub department_applied: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "experienceLevelApplied", default)]
    pub experience_level_applied: String,
    #[serde(rename = "linkedIn", default)]
    pub linked_in: Option<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub resume_url: String,
    pub score_out_of_100: f64,
    #[serde(rename = "submittedAt", default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub all_matched_list: Vec<AiMatchedCandidate>,
    #[serde(default)]
    pub best_candidates: u32,
    #[serde(default)]
    pub better_candidates: u32,
    #[serde(default)]
    pub good_candidates: u32,
    #[serde(default)]
    pub total_candidates_analyzed: u32,
}

/// The four summary counts, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub best_candidates: u32,
    pub better_candidates: u32,
    pub good_candidates: u32,
    pub total_candidates_analyzed: u32,
}

impl MatchResponse {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            best_candidates: self.best_candidates,
            better_candidates: self.better_candidates,
            good_candidates: self.good_candidates,
            total_candidates_analyzed: self.total_candidates_analyzed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<AiErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| format!("AI API request failed: {status}"))
}

/// Timeout-bounded client with retry on network errors, 429 and 5xx,
/// and an optional Redis cache in front of it.
#[derive(Clone)]
pub struct MatchClient {
    client: Client,
    endpoint: String,
    max_attempts: u32,
    backoff: Duration,
    cache: Option<MatchCache>,
}

impl MatchClient {
    pub fn new(base_url: &str, timeout: Duration, max_attempts: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: format!("{}{MATCH_PATH}", base_url.trim_end_matches('/')),
            max_attempts: max_attempts.max(1),
            backoff: DEFAULT_BACKOFF,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: MatchCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Base delay before the second attempt; doubles on each further retry.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub async fn match_resumes(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(request).await {
                debug!("AI match cache hit for {}", request.cache_key());
                return Ok(hit);
            }
        }

        let response = self.call(request).await?;
        info!(
            "AI matched {} of {} candidates for job {}",
            response.all_matched_list.len(),
            response.total_candidates_analyzed,
            request.job_id
        );

        if let Some(cache) = &self.cache {
            cache.put(request, &response).await;
        }
        Ok(response)
    }

    async fn call(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        let mut attempt = 1;
        loop {
            let err = match self.send_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_attempts && is_retryable(&e) => e,
                Err(e) => return Err(e),
            };

            let delay = self.backoff * 2u32.pow(attempt - 1);
            warn!(
                "AI match attempt {} failed ({}), retrying after {}ms...",
                attempt,
                err,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MatchError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Network failures, 429 and 5xx are worth another attempt; anything else is final.
fn is_retryable(err: &MatchError) -> bool {
    match err {
        MatchError::Http(_) => true,
        MatchError::Api { status, .. } => *status == 429 || *status >= 500,
        MatchError::Parse(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::test_support::{spawn_ai_stub, spawn_scripted_ai_stub};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_pool_size_defaults_when_no_applicants() {
        let id = Uuid::new_v4();
        assert_eq!(MatchRequest::for_job("sales", id, 0).top_n, DEFAULT_POOL_SIZE);
        assert_eq!(MatchRequest::for_job("sales", id, 12).top_n, 12);
    }

    #[test]
    fn test_request_wire_names() {
        let id = Uuid::nil();
        let body = serde_json::to_value(MatchRequest::for_job("devops", id, 3)).unwrap();
        assert_eq!(
            body,
            json!({"category": "devops", "jobId": id.to_string(), "top_n": 3})
        );
    }

    #[test]
    fn test_cache_key_covers_all_request_fields() {
        let request = MatchRequest::for_job("hr", Uuid::nil(), 2);
        assert_eq!(
            request.cache_key(),
            format!("match:hr:{}:2", Uuid::nil())
        );
    }

    #[test]
    fn test_error_message_prefers_body_fields() {
        assert_eq!(error_message(400, r#"{"message":"bad job"}"#), "bad job");
        assert_eq!(error_message(404, r#"{"error":"no such category"}"#), "no such category");
        assert_eq!(error_message(500, "<html>"), "AI API request failed: 500");
    }

    #[tokio::test]
    async fn test_decodes_ranked_list() {
        let base = spawn_ai_stub(
            StatusCode::OK,
            json!({
                "all_matched_list": [{
                    "candidate_id": "abc",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "matched_keywords": ["rust"],
                    "resume_url": "https://x/cv.pdf",
                    "score_out_of_100": 91.5
                }],
                "best_candidates": 1,
                "better_candidates": 0,
                "good_candidates": 0,
                "total_candidates_analyzed": 4
            }),
        )
        .await;
        let client = MatchClient::new(&base, Duration::from_secs(5), 1);

        let response = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 4))
            .await
            .unwrap();
        assert_eq!(response.all_matched_list.len(), 1);
        assert_eq!(response.summary().total_candidates_analyzed, 4);
    }

    #[tokio::test]
    async fn test_server_error_surfaces_after_retries() {
        let base = spawn_ai_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "model offline"}),
        )
        .await;
        let client =
            MatchClient::new(&base, Duration::from_secs(5), 2).with_backoff(Duration::ZERO);

        let err = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Api { status: 500, .. }));
        assert_eq!(err.to_string(), "model offline");
    }

    #[tokio::test]
    async fn test_unavailable_service_recovers_on_retry() {
        let (base, hits) = spawn_scripted_ai_stub(vec![
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": "warming up"}),
            ),
            (
                StatusCode::OK,
                json!({"all_matched_list": [], "total_candidates_analyzed": 3}),
            ),
        ])
        .await;
        let client =
            MatchClient::new(&base, Duration::from_secs(5), 3).with_backoff(Duration::ZERO);

        let response = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 3))
            .await
            .unwrap();
        assert_eq!(response.total_candidates_analyzed, 3);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_retried_until_attempts_run_out() {
        let (base, hits) =
            spawn_scripted_ai_stub(vec![(StatusCode::TOO_MANY_REQUESTS, json!({}))]).await;
        let client =
            MatchClient::new(&base, Duration::from_secs(5), 3).with_backoff(Duration::ZERO);

        let err = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Api { status: 429, .. }));
        assert_eq!(err.to_string(), "AI API request failed: 429");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (base, hits) = spawn_scripted_ai_stub(vec![
            (StatusCode::BAD_REQUEST, json!({"message": "unknown category"})),
            (StatusCode::OK, json!({"all_matched_list": []})),
        ])
        .await;
        let client =
            MatchClient::new(&base, Duration::from_secs(5), 3).with_backoff(Duration::ZERO);

        let err = client
            .match_resumes(&MatchRequest::for_job("nowhere", Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Api { status: 400, .. }));
        assert_eq!(err.to_string(), "unknown category");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let client = MatchClient::new("http://127.0.0.1:1", Duration::from_secs(1), 2)
            .with_backoff(Duration::ZERO);

        let err = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Http(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let base = spawn_ai_stub(StatusCode::OK, json!({"unexpected": true})).await;
        let client = MatchClient::new(&base, Duration::from_secs(5), 1);

        let err = client
            .match_resumes(&MatchRequest::for_job("engineering", Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)));
    }
}
