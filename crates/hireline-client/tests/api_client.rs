//! API client behavior against a mock backend.

use std::sync::Arc;

use hireline_auth::TokenStore;
use hireline_client::{ApiClient, ApiConfig, CandidatesApi, ClientError, JobsApi, QuestionsApi};
use hireline_models::{CandidateCreate, JobCreate, JobQuestionCreate, JobUpdate, ScreenStatus};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authed_client(server: &MockServer) -> ApiClient {
    let store = Arc::new(TokenStore::in_memory());
    store.set("test-token");
    client_with_store(server, store)
}

fn client_with_store(server: &MockServer, store: Arc<TokenStore>) -> ApiClient {
    ApiClient::new(
        ApiConfig {
            base_url: server.uri(),
        },
        store,
    )
}

fn job_json(id: Uuid, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "created_by_user_id": "user-1",
        "created_at": "2025-05-01T12:00:00Z",
        "candidate_count": 2,
        "average_score": 7.5,
    })
}

// =============================================================================
// Core request contract
// =============================================================================

#[tokio::test]
async fn empty_store_fails_before_any_network_call() {
    let server = MockServer::start().await;
    let client = client_with_store(&server, Arc::new(TokenStore::in_memory()));

    let err = JobsApi::new(client).list().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn sends_bearer_token_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobsApi::new(authed_client(&server)).list().await.unwrap();
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn error_body_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Job not found"})),
        )
        .mount(&server)
        .await;

    let err = JobsApi::new(authed_client(&server))
        .get(Uuid::new_v4())
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Job not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = JobsApi::new(authed_client(&server)).list().await.unwrap_err();
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "HTTP error! status: 500");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_response_is_a_network_error() {
    // Grab a port that answered once, then shut the server down so the
    // connection is refused outright. A non-pooled server is required here:
    // pooled servers from `MockServer::start()` keep listening after drop.
    let server = MockServer::builder().start().await;
    let client = authed_client(&server);
    drop(server);

    let err = JobsApi::new(client).list().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

// =============================================================================
// Jobs
// =============================================================================

#[tokio::test]
async fn list_jobs_parses_response() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([job_json(id, "Backend Engineer")])),
        )
        .mount(&server)
        .await;

    let jobs = JobsApi::new(authed_client(&server)).list().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, id);
    assert_eq!(jobs[0].title, "Backend Engineer");
    assert_eq!(jobs[0].candidate_count, 2);
    assert_eq!(jobs[0].average_score, Some(7.5));
}

#[tokio::test]
async fn create_job_posts_payload() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/"))
        .and(body_json(serde_json::json!({"title": "SRE"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(job_json(id, "SRE")))
        .expect(1)
        .mount(&server)
        .await;

    let job = JobsApi::new(authed_client(&server))
        .create(&JobCreate::with_title("SRE"))
        .await
        .unwrap();
    assert_eq!(job.id, id);
}

#[tokio::test]
async fn update_job_sends_only_changed_fields() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/jobs/{id}")))
        .and(body_json(serde_json::json!({"location": "Berlin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_json(id, "SRE")))
        .expect(1)
        .mount(&server)
        .await;

    let changes = JobUpdate {
        location: Some("Berlin".to_string()),
        ..Default::default()
    };
    JobsApi::new(authed_client(&server))
        .update(id, &changes)
        .await
        .unwrap();
}

// =============================================================================
// Candidates
// =============================================================================

#[tokio::test]
async fn list_candidates_for_job() {
    let server = MockServer::start().await;
    let job_id = Uuid::new_v4();
    let candidate_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/jobs/{job_id}/candidates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": candidate_id,
            "job_id": job_id,
            "full_name": "Ada Lovelace",
            "phone_number": "+15550100",
            "status": "completed",
            "score": 8.2,
            "created_at": "2025-05-02T09:30:00Z",
        }])))
        .mount(&server)
        .await;

    let candidates = CandidatesApi::new(authed_client(&server))
        .list_for_job(job_id)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].status, Some(ScreenStatus::Completed));
    assert_eq!(candidates[0].score, Some(8.2));
}

#[tokio::test]
async fn create_candidate_uses_candidates_path() {
    let server = MockServer::start().await;
    let job_id = Uuid::new_v4();
    let candidate_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/candidates/{job_id}")))
        .and(body_json(serde_json::json!({
            "full_name": "Grace Hopper",
            "phone_number": "+15550101",
            "email": "grace@example.com",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": candidate_id,
            "job_id": job_id,
            "full_name": "Grace Hopper",
            "phone_number": "+15550101",
            "email": "grace@example.com",
            "created_at": "2025-05-02T09:30:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let candidate = CandidatesApi::new(authed_client(&server))
        .create(
            job_id,
            &CandidateCreate {
                full_name: "Grace Hopper".to_string(),
                phone_number: "+15550101".to_string(),
                email: Some("grace@example.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(candidate.id, candidate_id);
    assert!(candidate.status.is_none());
}

// =============================================================================
// Questions
// =============================================================================

#[tokio::test]
async fn list_questions_for_job() {
    let server = MockServer::start().await;
    let job_id = Uuid::new_v4();
    let question_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/jobs/{job_id}/questions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": question_id,
            "job_id": job_id,
            "question_text": "Walk me through a recent project.",
            "created_at": "2025-05-02T09:30:00Z",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let questions = QuestionsApi::new(authed_client(&server))
        .list(job_id)
        .await
        .unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, question_id);
    assert_eq!(questions[0].question_text, "Walk me through a recent project.");
}

#[tokio::test]
async fn create_question_posts_text() {
    let server = MockServer::start().await;
    let job_id = Uuid::new_v4();
    let question_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/jobs/{job_id}/questions")))
        .and(body_json(serde_json::json!({"question_text": "Why this role?"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": question_id,
            "job_id": job_id,
            "question_text": "Why this role?",
            "created_at": "2025-05-02T09:30:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let question = QuestionsApi::new(authed_client(&server))
        .create(job_id, &JobQuestionCreate::new("Why this role?"))
        .await
        .unwrap();
    assert_eq!(question.question_text, "Why this role?");
}

#[tokio::test]
async fn delete_question_accepts_empty_204() {
    let server = MockServer::start().await;
    let job_id = Uuid::new_v4();
    let question_id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/jobs/{job_id}/questions/{question_id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    QuestionsApi::new(authed_client(&server))
        .delete(job_id, question_id)
        .await
        .unwrap();
}
