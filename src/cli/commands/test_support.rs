//! A live API server on an ephemeral port for command tests.

use tokio::net::TcpListener;

use crate::api::{AppState, create_router};
use crate::board::{BoardAggregate, IssuedToken};
use crate::cli::api_client::ApiClient;
use crate::cli::commands::user::{RegisterRequest, register};
use crate::db::{Database, SqliteDatabase};

/// Spawn a test HTTP server with in-memory database
pub(crate) async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let app = create_router(AppState::new(db, None), false);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, handle)
}

/// Register through the CLI command and return a client carrying the token.
pub(crate) async fn signed_in(url: &str, name: &str, email: &str) -> (ApiClient, IssuedToken) {
    let anonymous = ApiClient::new(Some(url.to_string()), None);
    let output = register(
        &anonymous,
        RegisterRequest {
            name,
            email,
            password: "hunter22",
        },
        "json",
    )
    .await
    .expect("register should succeed");
    let issued: IssuedToken = serde_json::from_str(&output).unwrap();

    (
        ApiClient::new(Some(url.to_string()), Some(issued.token.clone())),
        issued,
    )
}

/// Create a board over HTTP and return the aggregate.
pub(crate) async fn new_board(client: &ApiClient, title: &str) -> BoardAggregate {
    let response = client
        .post("/api/v1/boards")
        .json(&serde_json::json!({ "title": title }))
        .send()
        .await
        .unwrap();
    ApiClient::handle_response(response).await.unwrap()
}
