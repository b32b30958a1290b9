use serde_json::json;
use std::sync::Arc;
use taskman::api::{ApiClient, ErrorKind, RequestError};
use taskman::libs::credentials::{CredentialStore, MemoryCredentialStore};
use taskman::libs::task::{TaskDraft, TaskStatus};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer, store: Arc<MemoryCredentialStore>) -> ApiClient {
    ApiClient::new(format!("{}/api/v1", server.uri()), store)
}

fn empty_tasks_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {"tasks": [], "totalPages": 1}}))
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .respond_with(empty_tasks_page())
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    api.list_tasks(&[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(requests[0].headers.get("accept").unwrap(), "application/json");
}

#[tokio::test]
async fn test_token_stored_after_construction_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(empty_tasks_page())
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let api = client(&server, Arc::clone(&store));
    store.save("t0k").unwrap();

    api.list_tasks(&[]).await.unwrap();
}

#[tokio::test]
async fn test_cleared_token_is_no_longer_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"categories": []}})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token("t0k"));
    let api = client(&server, Arc::clone(&store));
    api.list_categories().await.unwrap();
    store.clear().unwrap();
    api.list_categories().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Bearer t0k");
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_decodes_user_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({"username": "ada", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"user": {"_id": "u1", "username": "ada", "email": "ada@example.com"}, "token": "t0k"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    let data = api.login("ada", "pw").await.unwrap();

    assert_eq!(data.token, "t0k");
    assert_eq!(data.user.id, "u1");
    assert_eq!(data.user.username, "ada");
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    let err = api.login("ada", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.status().map(|status| status.as_u16()), Some(401));
    match err {
        RequestError::Status { message, .. } => assert_eq!(message, "Invalid credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_and_server_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "title is required"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/tasks/t1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    let invalid = api.create_task(&TaskDraft::new("x", "y")).await.unwrap_err();
    let broken = api.delete_task("t1").await.unwrap_err();

    assert_eq!(invalid.kind(), ErrorKind::Validation);
    assert!(invalid.to_string().contains("title is required"));
    assert_eq!(broken.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn test_malformed_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"tasks": "nope"}})))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    let err = api.list_tasks(&[]).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Deserialization);
    match err {
        RequestError::Deserialization { endpoint, .. } => assert_eq!(endpoint, "/tasks"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let api = ApiClient::new("http://127.0.0.1:9/api/v1", Arc::new(MemoryCredentialStore::new()));
    let err = api.current_user().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_task_body_and_query_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tasks/t1"))
        .and(body_json(json!({
            "title": "Pay rent",
            "description": "Before the 5th",
            "dueDate": "2024-05-01",
            "status": "in-progress",
            "category": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"task": {
                "_id": "t1",
                "title": "Pay rent",
                "description": "Before the 5th",
                "dueDate": "2024-05-01T00:00:00.000Z",
                "status": "in-progress",
                "category": null
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(query_param("status", "completed"))
        .and(query_param("page", "2"))
        .respond_with(empty_tasks_page())
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryCredentialStore::new()));
    let draft = TaskDraft::new("Pay rent", "Before the 5th")
        .with_due_date(chrono::NaiveDate::from_ymd_opt(2024, 5, 1))
        .with_status(TaskStatus::InProgress);
    let task = api.update_task("t1", &draft).await.unwrap();
    assert_eq!(task.due_date, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
    assert_eq!(task.category_name(), "N/A");

    api.list_tasks(&[("page", "2".to_string()), ("status", "completed".to_string())])
        .await
        .unwrap();
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let query = requests[1].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("category"));
}
