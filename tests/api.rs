//! End-to-end tests for the HTTP routes, driven in-process through the router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use hello_api::api::{create_router, AppState, AuthPolicy, DATA_CREATED, DATA_PATH, GREETING};

/// Bearer token for the data endpoint, taken from the environment like a CI secret.
fn api_secret_key() -> String {
    dotenvy::dotenv().ok();
    std::env::var("API_SECRET_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| "test-secret".to_string())
}

fn permissive_app() -> Router {
    create_router(AppState::default())
}

fn enforcing_app(secret: &str) -> Router {
    create_router(AppState::new(AuthPolicy::RequireBearer(secret.to_string())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn get_root_returns_greeting() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(permissive_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, World!");
}

#[tokio::test]
async fn get_root_ignores_query_and_headers() {
    let request = Request::builder()
        .uri("/?name=someone&x=1")
        .header(header::AUTHORIZATION, "Bearer whatever")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(permissive_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, GREETING);
}

#[tokio::test]
async fn get_root_is_text_plain() {
    let response = permissive_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn post_with_json_and_bearer_returns_created() {
    let payload = json!({"data": "sampleData"});
    let request = Request::builder()
        .method("POST")
        .uri(DATA_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", api_secret_key()))
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let (status, body) = send(permissive_app(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "Data created successfully");
}

#[tokio::test]
async fn post_accepts_any_body() {
    let bodies: Vec<(Option<&str>, Vec<u8>)> = vec![
        (None, Vec::new()),
        (Some("application/json"), Vec::new()),
        (Some("application/json"), b"{not json".to_vec()),
        (Some("application/json"), b"[1, 2, 3]".to_vec()),
        (Some("text/plain"), b"plain text".to_vec()),
        (Some("application/octet-stream"), vec![0xff, 0x00, 0xfe]),
    ];

    for (content_type, body) in bodies {
        let mut builder = Request::builder().method("POST").uri(DATA_PATH);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        let (status, text) = send(permissive_app(), request).await;

        assert_eq!(status, StatusCode::CREATED, "content type {:?}", content_type);
        assert_eq!(text, DATA_CREATED);
    }
}

#[tokio::test]
async fn post_accepts_body_over_default_limit() {
    let body = vec![b'x'; 3 * 1024 * 1024];
    let request = Request::builder()
        .method("POST")
        .uri(DATA_PATH)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let (status, text) = send(permissive_app(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(text, DATA_CREATED);
}

#[tokio::test]
async fn post_ignores_authorization_when_permissive() {
    let headers = [
        None,
        Some("Bearer undefined"),
        Some("Bearer "),
        Some("Basic dXNlcjpwYXNz"),
        Some("garbage"),
    ];

    for value in headers {
        let mut builder = Request::builder().method("POST").uri(DATA_PATH);
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder.body(Body::from(r#"{"data":"sampleData"}"#)).unwrap();

        let (status, text) = send(permissive_app(), request).await;

        assert_eq!(status, StatusCode::CREATED, "authorization {:?}", value);
        assert_eq!(text, DATA_CREATED);
    }
}

#[tokio::test]
async fn enforcing_policy_accepts_matching_token() {
    let secret = api_secret_key();
    let request = Request::builder()
        .method("POST")
        .uri(DATA_PATH)
        .header(header::AUTHORIZATION, format!("Bearer {}", secret))
        .body(Body::from(r#"{"data":"sampleData"}"#))
        .unwrap();

    let (status, body) = send(enforcing_app(&secret), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, DATA_CREATED);
}

#[tokio::test]
async fn enforcing_policy_rejects_missing_or_wrong_token() {
    let cases = [None, Some("Bearer wrong"), Some("Token s3cret"), Some("Bearer")];

    for value in cases {
        let mut builder = Request::builder().method("POST").uri(DATA_PATH);
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = enforcing_app("s3cret")
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "authorization {:?}", value);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}

#[tokio::test]
async fn enforcing_policy_never_gates_root() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(enforcing_app("s3cret"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, GREETING);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri(DATA_PATH)
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(permissive_app(), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
