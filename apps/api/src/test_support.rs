//! Fixtures shared by the unit and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::Client as S3Client;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::matching::MatchClient;
use crate::models::candidate::{Candidate, STATUS_RECEIVED};
use crate::models::department::Department;
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::{Job, JobStatus};
use crate::state::AppState;
use crate::store::{AtsStore, MemoryStore};
use crate::uploads::UploadBroker;

pub fn sample_job(department: &str, status: JobStatus) -> Job {
    let now = Utc::now();
    Job {
        id: Uuid::new_v4(),
        department: department.to_string(),
        title: "Backend Engineer".to_string(),
        company: "Talent Hub".to_string(),
        location: "Berlin".to_string(),
        job_type: "full-time".to_string(),
        work_arrangement: "hybrid".to_string(),
        is_remote: false,
        salary_min: Some(70_000.0),
        salary_max: Some(90_000.0),
        salary_currency: "USD".to_string(),
        experience_level: "mid".to_string(),
        description: "Build the hiring pipeline.".to_string(),
        requirements: "Rust, SQL".to_string(),
        responsibilities: "Own services end to end.".to_string(),
        application_deadline: None,
        is_urgent: false,
        requires_cover_letter: false,
        requires_portfolio: false,
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        benefits: vec!["Remote budget".to_string()],
        status,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_candidate(department: &str, job_id: Uuid, name: &str) -> Candidate {
    Candidate {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: None,
        department_applied: department.to_string(),
        experience_level_applied: "mid".to_string(),
        job_id_applied: job_id,
        linked_in: None,
        portfolio: None,
        resume_url: format!("https://resumes.example.com/resumes/{job_id}.pdf"),
        original_file_name: None,
        cover_letter: None,
        submitted_at: Utc::now(),
        status: STATUS_RECEIVED.to_string(),
    }
}

pub fn sample_interview(candidate: &Candidate) -> Interview {
    let now = Utc::now();
    Interview {
        id: Uuid::new_v4(),
        candidate_id: candidate.id,
        candidate_name: candidate.full_name.clone(),
        candidate_email: Some(candidate.email.clone()),
        department_id: candidate.department_applied.clone(),
        job_id: candidate.job_id_applied,
        job_title: "Backend Engineer".to_string(),
        interviewer: "Jane Smith".to_string(),
        interview_timestamp: now,
        interview_date: now.format("%Y-%m-%d").to_string(),
        interview_time: now.format("%H:%M").to_string(),
        duration: "60 minutes".to_string(),
        interview_type: "Technical".to_string(),
        interview_format: "Video Call".to_string(),
        location_or_link: "https://meet.example.com/room".to_string(),
        notes: None,
        status: InterviewStatus::Scheduled,
        created_at: now,
    }
}

pub async fn seed_job(store: &MemoryStore, job: &Job) {
    store
        .upsert_job_department(&Department::touch(&job.department, job.created_at))
        .await
        .unwrap();
    store.insert_job(job).await.unwrap();
}

pub async fn seed_candidate(store: &MemoryStore, candidate: &Candidate) {
    store
        .upsert_candidate_department(&Department::touch(
            &candidate.department_applied,
            candidate.submitted_at,
        ))
        .await
        .unwrap();
    store.insert_candidate(candidate).await.unwrap();
}

/// S3 client with static credentials. Presigning never touches the network.
pub fn offline_s3_client(endpoint: Option<&str>) -> S3Client {
    let mut builder = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new(
            "test-access-key",
            "test-secret-key",
            None,
            None,
            "talenthub-test",
        ));
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}

/// Matcher aimed at a closed port, for tests that never reach the AI service.
pub fn offline_matcher() -> MatchClient {
    MatchClient::new("http://127.0.0.1:1", Duration::from_secs(1), 1)
}

pub fn test_state(store: Arc<dyn AtsStore>, matcher: MatchClient) -> AppState {
    AppState {
        store,
        uploads: UploadBroker::new(
            offline_s3_client(None),
            "talenthub-resumes".to_string(),
            "us-east-1".to_string(),
            None,
        ),
        matcher,
    }
}

/// Serves `/match_resumes` with a fixed status and body on an ephemeral port.
/// Returns the base URL.
pub async fn spawn_ai_stub(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/match_resumes",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serves `/match_resumes` with the scripted replies in order, repeating the
/// last one once the script runs out. Returns the base URL and a hit counter.
pub async fn spawn_scripted_ai_stub(
    script: Vec<(StatusCode, Value)>,
) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let script = Arc::new(script);

    let app = Router::new()
        .route(
            "/match_resumes",
            post(
                |State((hits, script)): State<(Arc<AtomicUsize>, Arc<Vec<(StatusCode, Value)>>)>| async move {
                    let n = hits.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = script[n.min(script.len() - 1)].clone();
                    (status, Json(body))
                },
            ),
        )
        .with_state((hits.clone(), script));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}
