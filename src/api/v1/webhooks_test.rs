//! Integration tests for the GitHub webhook receiver.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use crate::api::test_support::{test_app, test_app_with_secret, text_body};
use crate::github::sign;

const SECRET: &str = "webhook-secret";

fn delivery(event: &str, body: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/webhooks/github")
        .header("content-type", "application/json")
        .header("x-github-event", event);
    if let Some(signature) = signature {
        builder = builder.header("x-hub-signature-256", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn signed_ping_is_acknowledged() {
    let app = test_app_with_secret(Some(SECRET)).await;
    let body = r#"{"zen":"Design for failure."}"#;

    let response = app
        .oneshot(delivery("ping", body, Some(sign(SECRET, body.as_bytes()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Ping OK");
}

#[tokio::test(flavor = "multi_thread")]
async fn signed_push_is_processed() {
    let app = test_app_with_secret(Some(SECRET)).await;
    let body = r#"{"ref":"refs/heads/main","repository":{"full_name":"octocat/hello-world"},"commits":[{"id":"1"}]}"#;

    let response = app
        .oneshot(delivery("push", body, Some(sign(SECRET, body.as_bytes()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Webhook processed.");
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_or_missing_signature_is_unauthorized() {
    let app = test_app_with_secret(Some(SECRET)).await;
    let body = r#"{"zen":"x"}"#;

    for signature in [
        None,
        Some(sign("wrong-secret", body.as_bytes())),
        Some("sha256=zz".to_string()),
    ] {
        let response = app
            .clone()
            .oneshot(delivery("ping", body, signature))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let text = text_body(response).await;
        assert!(text.contains("Unauthorized"));
        assert!(!text.contains("signature"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_is_bad_request() {
    let app = test_app_with_secret(Some(SECRET)).await;
    let body = "not json";

    let response = app
        .oneshot(delivery("push", body, Some(sign(SECRET, body.as_bytes()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn without_secret_verification_is_skipped() {
    let app = test_app().await;

    let response = app
        .oneshot(delivery("issues", r#"{"action":"opened"}"#, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Webhook processed.");
}
