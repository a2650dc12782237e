pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, candidates, dashboard, interviews, jobs, matching, uploads};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handlers::handle_list_jobs).post(jobs::handlers::handle_create_job),
        )
        .route("/api/jobs/:id", get(jobs::handlers::handle_get_job))
        .route(
            "/api/jobs/:id/status",
            patch(jobs::handlers::handle_update_job_status),
        )
        .route(
            "/api/jobs/:id/applications",
            get(matching::handlers::handle_job_applications),
        )
        // Candidates
        .route(
            "/api/candidates",
            get(candidates::handlers::handle_list_candidates),
        )
        .route(
            "/api/candidates/:department/:id/status",
            patch(candidates::handlers::handle_update_candidate_status),
        )
        .route(
            "/api/applications",
            post(candidates::handlers::handle_submit_application),
        )
        // Interviews
        .route(
            "/api/interviews",
            get(interviews::handlers::handle_list_interviews)
                .post(interviews::handlers::handle_schedule_interview),
        )
        .route(
            "/api/interviews/:id/status",
            patch(interviews::handlers::handle_update_interview_status),
        )
        // Dashboard & reference data
        .route("/api/dashboard", get(dashboard::handle_dashboard))
        .route("/api/departments", get(dashboard::handle_departments))
        // Auth & uploads
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/s3-upload", post(uploads::handlers::handle_presign_upload))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::matching::MatchClient;
    use crate::models::job::JobStatus;
    use crate::store::{AtsStore, MemoryStore};
    use crate::test_support::{
        offline_matcher, sample_candidate, sample_interview, sample_job, seed_candidate, seed_job,
        spawn_ai_stub,
        test_state,
    };

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(Arc::new(MemoryStore::new()), offline_matcher()));
        let (status, body) = send(app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "talenthub-api");
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let app = build_router(test_state(store, offline_matcher()));

        let (status, jobs) = send(app.clone(), Method::GET, "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(jobs, json!([]));

        let (status, candidates) = send(app, Method::GET, "/api/candidates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(candidates, json!([]));
    }

    #[tokio::test]
    async fn test_scheduling_reflects_on_candidate() {
        let store = Arc::new(MemoryStore::new());
        let job = sample_job("engineering", JobStatus::Published);
        let candidate = sample_candidate("engineering", job.id, "Ada Lovelace");
        seed_job(&store, &job).await;
        seed_candidate(&store, &candidate).await;
        let app = build_router(test_state(store.clone(), offline_matcher()));

        let (status, interview) = send(
            app.clone(),
            Method::POST,
            "/api/interviews",
            Some(json!({
                "candidateId": candidate.id,
                "candidateName": candidate.full_name,
                "departmentId": "engineering",
                "jobId": job.id,
                "jobTitle": job.title,
                "interviewer": "John Doe",
                "interviewDate": "2026-11-20",
                "interviewTime": "10:00",
                "duration": "45 minutes",
                "interviewType": "Screening",
                "interviewFormat": "Phone",
                "locationOrLink": "+1 555 0100"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(interview["status"], "Scheduled");

        let (_, candidates) = send(
            app.clone(),
            Method::GET,
            "/api/candidates?stage=interview%20scheduled",
            None,
        )
        .await;
        assert_eq!(candidates.as_array().unwrap().len(), 1);
        assert_eq!(candidates[0]["status"], "Interview Scheduled");
        assert_eq!(candidates[0]["stage"], "interview");

        let (_, listing) = send(app, Method::GET, "/api/interviews", None).await;
        assert_eq!(listing["interviews"].as_array().unwrap().len(), 1);
        assert_eq!(listing["summary"]["scheduled"], 1);
    }

    #[tokio::test]
    async fn test_status_bodies_accept_any_case() {
        let store = Arc::new(MemoryStore::new());
        let job = sample_job("engineering", JobStatus::Published);
        let candidate = sample_candidate("engineering", job.id, "Ada Lovelace");
        seed_job(&store, &job).await;
        seed_candidate(&store, &candidate).await;
        let interview = sample_interview(&candidate);
        store
            .schedule_interview(&interview, "Interview Scheduled")
            .await
            .unwrap();
        let app = build_router(test_state(store.clone(), offline_matcher()));

        let (status, _) = send(
            app.clone(),
            Method::PATCH,
            &format!("/api/interviews/{}/status", interview.id),
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, listing) = send(app.clone(), Method::GET, "/api/interviews", None).await;
        assert_eq!(listing["interviews"][0]["status"], "Completed");

        let (status, updated) = send(
            app,
            Method::PATCH,
            &format!("/api/jobs/{}/status", job.id),
            Some(json!({"status": "Closed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "closed");
    }

    #[tokio::test]
    async fn test_ai_failure_reported_in_band() {
        let store = Arc::new(MemoryStore::new());
        let job = sample_job("engineering", JobStatus::Published);
        let candidate = sample_candidate("engineering", job.id, "Ada Lovelace");
        seed_job(&store, &job).await;
        seed_candidate(&store, &candidate).await;

        let base = spawn_ai_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "scoring backend crashed"}),
        )
        .await;
        let matcher = MatchClient::new(&base, Duration::from_secs(5), 1);
        let app = build_router(test_state(store, matcher));

        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/jobs/{}/applications", job.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applicantCount"], 1);
        assert_eq!(body["matches"]["error"], "scoring backend crashed");
        assert_eq!(body["matches"]["candidates"], json!([]));
        assert_eq!(body["matches"]["summary"], Value::Null);
    }

    #[tokio::test]
    async fn test_applications_merged_and_sorted() {
        let store = Arc::new(MemoryStore::new());
        let job = sample_job("engineering", JobStatus::Published);
        let ada = sample_candidate("engineering", job.id, "ada");
        let bob = sample_candidate("engineering", job.id, "Bob");
        seed_job(&store, &job).await;
        seed_candidate(&store, &ada).await;
        seed_candidate(&store, &bob).await;

        let base = spawn_ai_stub(
            StatusCode::OK,
            json!({
                "all_matched_list": [
                    {"candidate_id": bob.id.to_string(), "name": "Bob", "score_out_of_100": 93.0},
                    {"candidate_id": ada.id.to_string(), "name": "ada", "score_out_of_100": 61.0}
                ],
                "best_candidates": 1,
                "better_candidates": 0,
                "good_candidates": 1,
                "total_candidates_analyzed": 2
            }),
        )
        .await;
        let matcher = MatchClient::new(&base, Duration::from_secs(5), 1);
        let app = build_router(test_state(store, matcher));

        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/jobs/{}/applications?sort=name", job.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["matches"]["candidates"].as_array().unwrap();
        assert_eq!(rows[0]["fullName"], "ada");
        assert_eq!(rows[0]["matchTier"], "good");
        assert_eq!(rows[1]["matchTier"], "best");
        assert_eq!(rows[1]["email"], bob.email);
        assert_eq!(body["matches"]["summary"]["totalCandidatesAnalyzed"], 2);
        assert_eq!(body["matches"]["error"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let app = build_router(test_state(Arc::new(MemoryStore::new()), offline_matcher()));
        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/jobs/{}/applications", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_login() {
        let app = build_router(test_state(Arc::new(MemoryStore::new()), offline_matcher()));

        let (status, user) = send(
            app.clone(),
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "john.doe@talenthub.com", "password": "admin123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["role"], "HR Manager");

        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "john.doe@talenthub.com", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_upload_request_checks() {
        let app = build_router(test_state(Arc::new(MemoryStore::new()), offline_matcher()));

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/s3-upload",
            Some(json!({"fileName": "", "fileType": "application/pdf"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "File name and type are required");

        let (status, _) = send(
            app.clone(),
            Method::POST,
            "/api/s3-upload",
            Some(json!({
                "fileName": "cv.pdf",
                "fileType": "application/pdf",
                "fileSize": 5 * 1024 * 1024 + 1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/s3-upload",
            Some(json!({
                "fileName": "cv.pdf",
                "fileType": "application/pdf",
                "fileSize": 5 * 1024 * 1024
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["uploadUrl"].as_str().unwrap().contains("X-Amz-Expires=300"));
        assert!(body["finalUrl"].as_str().unwrap().ends_with("-cv.pdf"));
    }
}
