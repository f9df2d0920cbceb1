//! List management handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::DeletedResponse;
use crate::api::{ApiError, AppState, AuthUser, ErrorResponse};
use crate::board::BoardService;
use crate::db::{Database, List};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateListRequest {
    #[schema(example = "Review")]
    pub title: String,
}

/// Partial list update. A new `order` moves the list to that position.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateListRequest {
    #[schema(example = "QA")]
    pub title: Option<String>,
    #[schema(example = 0)]
    pub order: Option<i64>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/v1/boards/{id}/lists",
    tag = "lists",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "List appended to the board", body = List),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn create_list<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<List>), ApiError> {
    let Json(req) = payload?;
    let list = BoardService::new(state.db())
        .create_list(&board_id, &user.id, &req.title)
        .await?;
    Ok((StatusCode::CREATED, Json(list)))
}

#[utoipa::path(
    put,
    path = "/api/v1/lists/{id}",
    tag = "lists",
    params(
        ("id" = String, Path, description = "List ID")
    ),
    request_body = UpdateListRequest,
    responses(
        (status = 200, description = "List updated", body = List),
        (status = 400, description = "Empty title or order out of range", body = ErrorResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn update_list<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateListRequest>, JsonRejection>,
) -> Result<Json<List>, ApiError> {
    let Json(req) = payload?;
    let list = BoardService::new(state.db())
        .update_list(&id, &user.id, req.title.as_deref(), req.order)
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lists/{id}",
    tag = "lists",
    params(
        ("id" = String, Path, description = "List ID")
    ),
    responses(
        (status = 200, description = "List and its tasks deleted", body = DeletedResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn delete_list<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    BoardService::new(state.db())
        .delete_list(&id, &user.id)
        .await?;
    Ok(Json(DeletedResponse {
        id,
        message: "List removed".to_string(),
    }))
}
