//! HTTP probe and metrics endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use parameter_store_controller::observability::metrics;
use parameter_store_controller::server::{router, ServerState};
use std::sync::Arc;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn test_healthz_always_ok() {
    let response = router(Arc::new(ServerState::default()))
        .oneshot(get("/healthz"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_follows_server_state() {
    let state = Arc::new(ServerState::default());

    let response = router(Arc::clone(&state))
        .oneshot(get("/readyz"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.set_ready(true);
    let response = router(Arc::clone(&state))
        .oneshot(get("/readyz"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_exposes_controller_metrics() {
    metrics::register_metrics().unwrap();
    metrics::increment_reconciliations();

    let response = router(Arc::new(ServerState::default()))
        .oneshot(get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("parameter_store_reconciliations_total"));
}
