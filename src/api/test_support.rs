//! Router fixtures shared by the handler tests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

pub(crate) async fn test_app_with_secret(secret: Option<&str>) -> Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState::new(db, secret.map(str::to_string));
    routes::create_router(state, false)
}

pub(crate) async fn test_app() -> Router {
    test_app_with_secret(None).await
}

pub(crate) async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub(crate) async fn text_body(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// A request with an optional bearer token and an optional JSON body.
pub(crate) fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub(crate) async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

/// Register a user and return (id, token).
pub(crate) async fn register(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/v1/users/register",
            None,
            Some(json!({"name": name, "email": email, "password": "hunter22"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    (
        body["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Create a board and return its aggregate.
pub(crate) async fn create_board(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        request("POST", "/api/v1/boards", Some(token), Some(json!({"title": title}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create board failed: {}", body);
    body
}

/// Create a task and return it.
pub(crate) async fn create_task(app: &Router, token: &str, list_id: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        request(
            "POST",
            &format!("/api/v1/lists/{}/tasks", list_id),
            Some(token),
            Some(json!({"title": title})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
    body
}

pub(crate) fn str_at<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("no string at {} in {}", pointer, value))
}
