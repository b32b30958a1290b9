use serde_json::json;
use std::sync::Arc;
use taskman::api::ApiClient;
use taskman::libs::credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use taskman::libs::data_storage::DataStorage;
use taskman::libs::guard::{Guard, View};
use taskman::libs::context::AppContext;
use taskman::libs::session::{SessionState, SessionStore};
use tempfile::TempDir;
use test_context::{test_context, AsyncTestContext};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock task server plus a credential file in a throwaway data directory.
struct SessionTestContext {
    _temp_dir: TempDir,
    server: MockServer,
    store: Arc<FileCredentialStore>,
}

impl AsyncTestContext for SessionTestContext {
    async fn setup() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileCredentialStore::new(&DataStorage::with_base_path(temp_dir.path())).unwrap());
        SessionTestContext {
            _temp_dir: temp_dir,
            server: MockServer::start().await,
            store,
        }
    }
}

impl SessionTestContext {
    fn api(&self) -> ApiClient {
        ApiClient::new(format!("{}/api/v1", self.server.uri()), self.store.clone())
    }

    async fn accept_login(&self) {
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"user": {"_id": "u1", "username": "ada", "email": "ada@example.com"}, "token": "t0k"}
            })))
            .mount(&self.server)
            .await;
    }
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_valid_login_authenticates_and_persists(ctx: &mut SessionTestContext) {
    ctx.accept_login().await;
    let mut session = SessionStore::new(&ctx.api());
    assert_eq!(session.init().await, SessionState::Unauthenticated);

    assert!(session.login("ada", "pw").await);

    assert_eq!(session.state(), SessionState::Authenticated);
    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|user| user.username.as_str()), Some("ada"));
    assert_eq!(ctx.store.load().as_deref(), Some("t0k"));
    assert!(ctx.store.path().exists());
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_invalid_login_stores_nothing(ctx: &mut SessionTestContext) {
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());
    session.init().await;

    assert!(!session.login("ada", "wrong").await);

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(session.user().is_none());
    assert_eq!(ctx.store.load(), None);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_logout_clears_even_when_server_fails(ctx: &mut SessionTestContext) {
    ctx.accept_login().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/logout"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());
    session.init().await;
    assert!(session.login("ada", "pw").await);

    session.logout().await;

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(session.user().is_none());
    assert_eq!(ctx.store.load(), None);
}

#[tokio::test]
async fn test_logout_clears_when_server_is_unreachable() {
    let store = Arc::new(MemoryCredentialStore::with_token("t0k"));
    let mut session = SessionStore::new(&ApiClient::new("http://127.0.0.1:9/api/v1", store.clone()));

    session.logout().await;

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(store.load(), None);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_init_restores_accepted_credential(ctx: &mut SessionTestContext) {
    ctx.store.save("t0k").unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"user": {"_id": "u1", "username": "ada", "email": "ada@example.com"}}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());
    assert!(session.is_loading());

    assert_eq!(session.init().await, SessionState::Authenticated);
    assert!(!session.is_loading());
    assert_eq!(session.user().map(|user| user.email.as_str()), Some("ada@example.com"));

    // A second init is a no-op; the mock expects a single verification
    assert_eq!(session.init().await, SessionState::Authenticated);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_init_evicts_rejected_credential(ctx: &mut SessionTestContext) {
    ctx.store.save("expired").unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());

    assert_eq!(session.init().await, SessionState::Unauthenticated);
    assert_eq!(ctx.store.load(), None);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_init_without_credential_skips_the_server(ctx: &mut SessionTestContext) {
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());

    assert_eq!(session.init().await, SessionState::Unauthenticated);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_signup_leaves_session_unchanged(ctx: &mut SessionTestContext) {
    Mock::given(method("POST"))
        .and(path("/api/v1/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"user": {"_id": "u2", "username": "grace", "email": "grace@example.com"}}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut session = SessionStore::new(&ctx.api());
    session.init().await;

    assert!(session.signup("grace", "grace@example.com", "pw").await);

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(ctx.store.load(), None);
}

#[test_context(SessionTestContext)]
#[tokio::test]
async fn test_guards_follow_the_session(ctx: &mut SessionTestContext) {
    ctx.accept_login().await;
    let mut app = AppContext::new(ctx.api());

    assert_eq!(app.guard(View::Tasks), Guard::Wait);
    app.init().await;
    assert_eq!(app.guard(View::Tasks), Guard::Redirect(View::Login));
    assert_eq!(app.guard(View::Login), Guard::Render);

    assert!(app.session.login("ada", "pw").await);
    assert_eq!(app.guard(View::Calendar), Guard::Render);
    assert_eq!(app.guard(View::Signup), Guard::Redirect(View::Tasks));

    app.dispose();
    assert_eq!(app.guard(View::Categories), Guard::Wait);
    // The credential survives dispose for the next start
    assert_eq!(ctx.store.load().as_deref(), Some("t0k"));
}
