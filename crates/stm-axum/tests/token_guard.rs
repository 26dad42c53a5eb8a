use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value as JsonValue;
use std::{sync::Arc, time::Duration};
use stm_axum::{TokenGuard, TokenGuardRouteExt, DEFAULT_TOKEN_HEADER};
use stm_core::pool::{TokenManager, TokenPool};
use stm_test::test;
use tower::ServiceExt;

fn guarded_app(manager: Arc<dyn TokenManager>) -> Router {
    let guard = TokenGuard::from_header_str(manager, "X-Token").unwrap();
    Router::new()
        .route("/", get(|| async { "protected" }))
        .with_token_guard(guard)
}

fn request_with_token(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/");
    if let Some(token) = token {
        builder = builder.header("X-Token", token);
    }
    builder.body(Body::empty()).unwrap()
}

#[test]
async fn valid_token_is_admitted() {
    let pool = Arc::new(TokenPool::new(1, 1, Duration::from_secs(3600)).unwrap());
    let token = pool.issue();
    let app = guarded_app(pool);

    let response = app.oneshot(request_with_token(Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"protected");
}

#[test]
async fn unknown_token_is_rejected() {
    let pool = Arc::new(TokenPool::new(1, 1, Duration::from_secs(3600)).unwrap());
    let app = guarded_app(pool);

    let response = app
        .oneshot(request_with_token(Some("7b1c4f2e-0000-4000-8000-000000000000")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let problem: JsonValue = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["type"], "invalid-token");
    assert_eq!(problem["detail"], "Invalid token");
}

#[test]
async fn missing_header_is_rejected() {
    let pool = Arc::new(TokenPool::new(1, 0, Duration::ZERO).unwrap());
    pool.issue();
    let app = guarded_app(pool);

    let response = app.oneshot(request_with_token(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
async fn guard_counts_admitted_requests_as_uses() {
    let pool = Arc::new(TokenPool::new(1, 0, Duration::ZERO).unwrap());
    let token = pool.issue();
    let app = guarded_app(pool.clone());

    for _ in 0..3 {
        let response = app.clone().oneshot(request_with_token(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(pool.snapshot().slots[0].use_count(), 4);
}

#[test]
async fn unguarded_paths_fall_through() {
    let pool = Arc::new(TokenPool::new(1, 0, Duration::ZERO).unwrap());
    let app = guarded_app(pool);

    let response = app
        .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn invalid_header_name_is_reported() {
    let pool = Arc::new(TokenPool::new(1, 0, Duration::ZERO).unwrap());
    assert!(TokenGuard::from_header_str(pool.clone(), "not a header").is_err());

    let guard = TokenGuard::from_header_str(pool, DEFAULT_TOKEN_HEADER).unwrap();
    assert_eq!(guard.header().as_str(), "x-token");
}
