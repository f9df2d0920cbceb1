//! GitHub webhook receiver.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::Database;
use crate::github::{EVENT_HEADER, SIGNATURE_HEADER, WebhookEvent, verify_signature};

/// Receive a GitHub delivery
///
/// Authenticated by the `X-Hub-Signature-256` HMAC of the raw body, not by a
/// bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/webhooks/github",
    tag = "webhooks",
    request_body(content = String, content_type = "application/json"),
    params(
        ("X-GitHub-Event" = String, Header, description = "Event type"),
        ("X-Hub-Signature-256" = String, Header, description = "sha256=<hex HMAC of the body>")
    ),
    responses(
        (status = 200, description = "Delivery acknowledged", body = String),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 401, description = "Signature verification failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers, body))]
pub async fn github_webhook<D: Database>(
    State(state): State<AppState<D>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    match state.webhook_secret() {
        Some(secret) => {
            let signature = headers
                .get(SIGNATURE_HEADER)
                .and_then(|v| v.to_str().ok());
            if let Err(e) = verify_signature(secret, &body, signature) {
                warn!(reason = %e, "webhook signature verification failed");
                return Err(ApiError::Unauthorized("Unauthorized".to_string()));
            }
        }
        None => warn!("webhook secret not configured; skipping signature verification"),
    }

    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "webhook payload is not valid JSON");
        ApiError::BadRequest("Invalid JSON payload".to_string())
    })?;

    let name = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match WebhookEvent::parse(name, payload) {
        WebhookEvent::Ping => {
            info!("GitHub webhook ping received");
            Ok((StatusCode::OK, "Ping OK"))
        }
        WebhookEvent::Push(push) => {
            info!(
                repository = %push.repository.full_name,
                git_ref = push.git_ref.as_deref().unwrap_or("-"),
                commits = push.commits.len(),
                "GitHub push received"
            );
            Ok((StatusCode::OK, "Webhook processed."))
        }
        WebhookEvent::Other { name } => {
            debug!(event = %name, "GitHub webhook event ignored");
            Ok((StatusCode::OK, "Webhook processed."))
        }
    }
}
