//! Health probes, static assets and request ids.

use axum::http::StatusCode;

use shopkeep_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_readiness_with_database() {
    let app = TestApp::spawn().await;

    let response = app.get("/health/ready", None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let app = TestApp::spawn().await;

    let response = app.get("/static/style.css", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".site-header"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::spawn().await;

    let response = app.get("/", None).await;

    let request_id = response
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
