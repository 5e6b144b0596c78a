//! Integration tests exercising the API client against a stub backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ariza_admin::client::{ApiClient, ApiError, GENERIC_FETCH_ERROR};
use ariza_admin::config::{Config, Environment};
use ariza_admin::models::ApplicationStatus;
use ariza_admin::session::SessionStore;
use ariza_admin::view::{ApplicationBrowser, LoadState};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

/// Bind the stub backend on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_config(base_url: String) -> Config {
    Config {
        api_base_url: base_url,
        request_timeout_secs: 5,
        cache_freshness_secs: 300,
        environment: Environment::Development,
    }
}

fn client_with_token(base_url: String) -> ApiClient {
    let session = Arc::new(SessionStore::new());
    session.set_token("tok-123");
    ApiClient::new(&test_config(base_url), session)
}

#[tokio::test]
async fn test_fetch_returns_normalized_collection() {
    let app = Router::new().route(
        "/applications/",
        get(|| async {
            Json(json!([
                { "id": 1, "status": "Yangi", "name": "Ali", "phone": "900" },
                { "id": 2, "status": "APPROVED", "fio": "Valiyev V.", "phone": "901" }
            ]))
        }),
    );
    let mut client = client_with_token(serve(app).await);

    let records = client.fetch_applications().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, ApplicationStatus::Pending);
    assert_eq!(records[0].display_name(), "Ali");
    assert_eq!(records[1].status, ApplicationStatus::Approved);
    assert_eq!(records[1].display_name(), "Valiyev V.");
}

#[tokio::test]
async fn test_unauthorized_without_token_makes_no_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/applications/",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!([]))
            }),
        )
        .with_state(Arc::clone(&hits));

    let session = Arc::new(SessionStore::new());
    let mut client = ApiClient::new(&test_config(serve(app).await), session);

    let result = client.fetch_applications().await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_array_body_degrades_to_empty() {
    let app = Router::new().route("/applications/", get(|| async { Json(json!({})) }));
    let mut client = client_with_token(serve(app).await);

    let records = client.fetch_applications().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let app = Router::new().route(
        "/applications/",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": "Token expired" })),
            )
        }),
    );
    let mut client = client_with_token(serve(app).await);

    match client.fetch_applications().await {
        Err(ApiError::Remote { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Token expired");
        }
        other => panic!("expected remote error, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_generic_message_when_error_body_unparseable() {
    let app = Router::new().route(
        "/applications/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let mut client = client_with_token(serve(app).await);

    match client.fetch_applications().await {
        Err(ApiError::Remote { message, .. }) => assert_eq!(message, GENERIC_FETCH_ERROR),
        other => panic!("expected remote error, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_remote_failure_is_retried_once() {
    async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> Response {
        if hits.fetch_add(1, Ordering::SeqCst) == 0 {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Vaqtinchalik xatolik" })),
            )
                .into_response()
        } else {
            Json(json!([{ "id": 1, "status": "PENDING" }])).into_response()
        }
    }

    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/applications/", get(flaky))
        .with_state(Arc::clone(&hits));
    let mut client = client_with_token(serve(app).await);

    let records = client.fetch_applications().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_reuses_fresh_snapshot() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/applications/",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!([{ "id": 1, "status": "Yangi" }]))
            }),
        )
        .with_state(Arc::clone(&hits));
    let mut client = client_with_token(serve(app).await);

    client.fetch_applications().await.unwrap();
    client.fetch_applications().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    client.invalidate();
    client.fetch_applications().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_login_stores_token_and_authenticates_fetch() {
    async fn applications(headers: HeaderMap) -> Response {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer tok-123") => {
                Json(json!([{ "id": 1, "status": "Yangi" }])).into_response()
            }
            _ => (
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": "Token yaroqsiz" })),
            )
                .into_response(),
        }
    }

    let app = Router::new()
        .route(
            "/auth/login/",
            post(|| async { Json(json!({ "token": "tok-123" })) }),
        )
        .route("/applications/", get(applications));

    let session = Arc::new(SessionStore::new());
    let mut client = ApiClient::new(&test_config(serve(app).await), Arc::clone(&session));

    client.login("admin", "parol").await.unwrap();
    assert_eq!(session.token(), Some("tok-123".to_string()));

    let records = client.fetch_applications().await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    let app = Router::new().route(
        "/auth/login/",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Login yoki parol noto'g'ri" })),
            )
        }),
    );

    let session = Arc::new(SessionStore::new());
    let client = ApiClient::new(&test_config(serve(app).await), Arc::clone(&session));

    match client.login("admin", "xato").await {
        Err(ApiError::Remote { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Login yoki parol noto'g'ri");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_browser_exposes_failure_and_ready_states() {
    let failing = Router::new().route(
        "/applications/",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": "Token expired" })),
            )
        }),
    );
    let mut browser = ApplicationBrowser::new(client_with_token(serve(failing).await));
    browser.refresh().await;
    assert_eq!(browser.error(), Some("Token expired"));

    let working = Router::new().route(
        "/applications/",
        get(|| async {
            Json(json!([
                { "id": 1, "status": "Yangi", "name": "Ali", "phone": "900" },
                { "id": 2, "status": "APPROVED", "name": "Vali", "phone": "901" }
            ]))
        }),
    );
    let mut browser = ApplicationBrowser::new(client_with_token(serve(working).await));
    browser.set_status_filter("PENDING");
    browser.refresh().await;

    assert!(matches!(browser.state(), LoadState::Ready(_)));
    let view = browser.view();
    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.filtered[0].display_name(), "Ali");
    assert_eq!(view.counts.pending, 1);
    assert_eq!(view.counts.approved, 1);
}
