//! Mock backend tests for nexus-http.
//!
//! These tests use wiremock to simulate the NexusVoice backend and exercise
//! the request pipeline and the session lifecycle without network access.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nexus_core::error::TransportError;
use nexus_core::{
    AccessToken, ApiUrl, AppProfile, AuthData, CredentialStore, Credentials, Error,
    HistoryNavigator, MemoryStore, RefreshToken, Registration, SessionState,
};
use nexus_http::{ApiClient, ClientConfig, SessionStore, api};

struct Harness {
    store: SessionStore,
    memory: Arc<MemoryStore>,
    navigator: Arc<HistoryNavigator>,
}

fn harness_at(base: &str, profile: AppProfile, timeout: Duration) -> Harness {
    let memory = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionState::restore(memory.clone(), profile.storage_keys()).unwrap());
    let navigator = Arc::new(HistoryNavigator::new());

    let config = ClientConfig::new(ApiUrl::new(base).unwrap()).with_timeout(timeout);
    let client = ApiClient::new(
        config,
        session,
        navigator.clone(),
        profile.routes().login_route(),
    )
    .unwrap();

    Harness {
        store: SessionStore::new(client, *profile.routes()),
        memory,
        navigator,
    }
}

/// Helper to build a user-profile harness against a mock server.
fn harness(server: &MockServer) -> Harness {
    harness_at(
        &format!("{}/api", server.uri()),
        AppProfile::User,
        Duration::from_secs(5),
    )
}

fn auth_data(token: &str) -> AuthData {
    AuthData {
        access_token: AccessToken::new(token),
        refresh_token: Some(RefreshToken::new(format!("{token}-refresh"))),
        token_type: Some("Bearer".into()),
        expires_at: None,
        user_info: Some(json!({"id": 1, "email": "alice@example.com"})),
    }
}

fn auth_body(token: &str) -> Value {
    json!({
        "success": true,
        "code": 200,
        "message": "ok",
        "data": {
            "accessToken": token,
            "refreshToken": format!("{token}-refresh"),
            "tokenType": "Bearer",
            "expiresAt": "2025-09-22T15:30:00",
            "userInfo": {"id": 1, "email": "alice@example.com", "nickname": "alice"}
        }
    })
}

// ============================================================================
// Login / Register
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "username": "alice@example.com",
            "password": "secret123",
            "rememberMe": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-1")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let credentials = Credentials::new("alice@example.com", "secret123").remember_me(true);
    h.store.login(&credentials).await.unwrap();

    assert!(h.store.is_logged_in());
    assert_eq!(h.memory.get("user-token").unwrap().as_deref(), Some("tok-1"));
    assert_eq!(
        h.memory.get("user-refresh-token").unwrap().as_deref(),
        Some("tok-1-refresh")
    );
    assert_eq!(h.store.user_info().unwrap()["nickname"], "alice");
    assert_eq!(h.navigator.current().as_deref(), Some("/"));
}

#[tokio::test]
async fn test_login_rejected_by_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "code": 1001,
            "message": "invalid credentials"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let err = h
        .store
        .login(&Credentials::new("alice@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid credentials");
    assert!(matches!(err, Error::Application { code: Some(1001), .. }));
    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_login_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 500})))
        .mount(&server)
        .await;

    let h = harness(&server);
    let err = h
        .store
        .login(&Credentials::new("alice@example.com", "pw"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "login failed");
}

#[tokio::test]
async fn test_login_transport_failure() {
    // Nothing listens on port 1
    let h = harness_at(
        "http://127.0.0.1:1/api",
        AppProfile::User,
        Duration::from_secs(5),
    );

    let err = h
        .store
        .login(&Credentials::new("alice@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!h.store.is_logged_in());
}

#[tokio::test]
async fn test_register_logs_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "email": "bob@example.com",
            "password": "pw12345",
            "confirmPassword": "pw12345",
            "nickname": "bob"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-new")))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store
        .register(&Registration::new("bob@example.com", "pw12345", "bob"))
        .await
        .unwrap();

    assert_eq!(h.memory.get("user-token").unwrap().as_deref(), Some("tok-new"));
    assert_eq!(h.navigator.current().as_deref(), Some("/"));
}

#[tokio::test]
async fn test_admin_profile_uses_admin_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("admin-tok")))
        .mount(&server)
        .await;

    let h = harness_at(
        &format!("{}/api", server.uri()),
        AppProfile::Admin,
        Duration::from_secs(5),
    );
    h.store
        .login(&Credentials::new("root@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(h.memory.get("admin-token").unwrap().as_deref(), Some("admin-tok"));
    assert_eq!(h.memory.get("user-token").unwrap(), None);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer tok-out"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok-out")).unwrap();

    h.store.logout().await;

    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert_eq!(h.navigator.history(), vec!["/login"]);
}

#[tokio::test]
async fn test_logout_clears_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500,
            "message": "internal error"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok")).unwrap();

    h.store.logout().await;

    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert_eq!(h.navigator.current().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_logout_clears_when_backend_unreachable() {
    let h = harness_at(
        "http://127.0.0.1:1/api",
        AppProfile::User,
        Duration::from_secs(5),
    );
    h.store.session().set_auth_data(&auth_data("tok")).unwrap();

    h.store.logout().await;

    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert_eq!(h.navigator.current().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_logout_with_expired_token_navigates_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("stale")).unwrap();

    h.store.logout().await;

    assert!(!h.store.is_logged_in());
    assert_eq!(h.navigator.count("/login"), 1);
}

#[tokio::test]
async fn test_logout_cancelled_still_clears() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok-slow")).unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(100), h.store.logout()).await;
    assert!(outcome.is_err());

    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert_eq!(h.navigator.current().as_deref(), Some("/login"));
    assert_eq!(h.navigator.history(), vec!["/login"]);
}

// ============================================================================
// Request pipeline
// ============================================================================

#[tokio::test]
async fn test_bearer_attached_when_logged_in() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roles/private"))
        .and(header("authorization", "Bearer tok-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"records": [], "total": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok-b")).unwrap();

    let page = api::roles::private(h.store.client(), &api::PageQuery::default())
        .await
        .unwrap()
        .into_data_or("failed")
        .unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_no_bearer_without_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roles/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": []})))
        .mount(&server)
        .await;

    let h = harness(&server);
    let envelope = api::roles::public(h.store.client(), &api::PageQuery::default())
        .await
        .unwrap();
    assert!(envelope.is_success());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_read_fresh_for_each_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("first")).unwrap();
    api::auth::me(h.store.client()).await.unwrap();
    h.store.session().set_auth_data(&auth_data("second")).unwrap();
    api::auth::me(h.store.client()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: Vec<_> = requests
        .iter()
        .map(|r| r.headers.get("authorization").unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(sent, vec!["Bearer first", "Bearer second"]);
}

#[tokio::test]
async fn test_unauthorized_forces_logout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/conversations/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("expired")).unwrap();

    let err = api::conversations::list(h.store.client(), None)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("token expired"));
    assert!(!h.store.is_logged_in());
    assert!(h.memory.is_empty());
    assert_eq!(h.navigator.history(), vec!["/login"]);
}

#[tokio::test]
async fn test_concurrent_unauthorized_logs_out_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roles/private"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"code": 401})))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("expired")).unwrap();

    let query = api::PageQuery::default();
    let results = join_all((0..8).map(|_| api::roles::private(h.store.client(), &query))).await;

    assert!(results.iter().all(|r| matches!(r, Err(e) if e.is_unauthorized())));
    assert_eq!(h.navigator.count("/login"), 1);
    assert!(!h.store.is_logged_in());
}

#[tokio::test]
async fn test_other_errors_keep_session() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/conversations/5"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 403,
            "message": "forbidden"
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok")).unwrap();

    let err = api::conversations::delete(h.store.client(), 5).await.unwrap_err();

    match err {
        Error::Protocol(e) => {
            assert_eq!(e.status, 403);
            assert_eq!(e.message.as_deref(), Some("forbidden"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(h.store.is_logged_in());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_timeout_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tts/voice-types"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let h = harness_at(
        &format!("{}/api", server.uri()),
        AppProfile::User,
        Duration::from_millis(100),
    );

    let err = api::tts::voice_types(h.store.client()).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout { duration_ms: 100 })
    ));
}

#[tokio::test]
async fn test_undecodable_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/image/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let h = harness(&server);
    let err = api::image::models(h.store.client()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
}

// ============================================================================
// Refresh / current user
// ============================================================================

#[tokio::test]
async fn test_refresh_replaces_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "old-refresh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"accessToken": "new-access"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let mut auth = auth_data("old");
    auth.refresh_token = Some(RefreshToken::new("old-refresh"));
    h.store.session().set_auth_data(&auth).unwrap();

    h.store.refresh().await.unwrap();

    assert_eq!(h.memory.get("user-token").unwrap().as_deref(), Some("new-access"));
    assert_eq!(
        h.memory.get("user-refresh-token").unwrap().as_deref(),
        Some("old-refresh")
    );
    assert_eq!(h.store.user_info().unwrap()["email"], "alice@example.com");
}

#[tokio::test]
async fn test_current_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 1, "nickname": "alice"}
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.session().set_auth_data(&auth_data("tok")).unwrap();

    let me = h.store.current_user().await.unwrap();
    assert_eq!(me["nickname"], "alice");
}

// ============================================================================
// Endpoint mapping
// ============================================================================

#[tokio::test]
async fn test_public_roles_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roles/public"))
        .and(query_param("page", "2"))
        .and(query_param("size", "20"))
        .and(query_param("keyword", "detective"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let query = api::PageQuery::page(2, 20).with_keyword("detective");
    api::roles::public(h.store.client(), &query).await.unwrap();
}

#[tokio::test]
async fn test_chat_and_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/conversations/chat"))
        .and(body_json(json!({
            "conversationId": 42,
            "message": "hello",
            "enableWebSearch": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"reply": "hi there"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/conversations/42/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"role": "user", "content": "hello"}]
        })))
        .mount(&server)
        .await;

    let h = harness(&server);
    let mut request = api::conversations::ChatRequest::new("hello");
    request.conversation_id = Some(42);

    let reply = api::conversations::chat(h.store.client(), &request)
        .await
        .unwrap()
        .into_data_or("chat failed")
        .unwrap();
    assert_eq!(reply["reply"], "hi there");

    let history = api::conversations::history(h.store.client(), 42)
        .await
        .unwrap()
        .into_data_or("history failed")
        .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_assistant_brief_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/roles/assistant/brief"))
        .and(query_param("conversationId", "7"))
        .and(query_param("enableWebSearch", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    api::assistant::brief(h.store.client(), 7, true).await.unwrap();
}

#[tokio::test]
async fn test_upload_image_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/file/upload/image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": "https://cdn.example.com/avatar.png"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("avatar.png");
    std::fs::write(&file, b"\x89PNG fake").unwrap();

    let h = harness(&server);
    let url = api::files::upload_image_file(h.store.client(), &file)
        .await
        .unwrap()
        .into_data_or("upload failed")
        .unwrap();
    assert_eq!(url, "https://cdn.example.com/avatar.png");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"avatar.png\""));
}

#[tokio::test]
async fn test_admin_delete_public_role() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/roles/public/3"))
        .and(header("authorization", "Bearer admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness_at(
        &format!("{}/api", server.uri()),
        AppProfile::Admin,
        Duration::from_secs(5),
    );
    h.store.session().set_auth_data(&auth_data("admin")).unwrap();

    let envelope = api::admin::delete_public_role(h.store.client(), 3).await.unwrap();
    assert!(envelope.into_result().unwrap().is_none());
}
