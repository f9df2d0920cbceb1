//! Board management handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::{ApiError, AppState, AuthUser, ErrorResponse};
use crate::board::{BoardAggregate, BoardService, BoardSummary};
use crate::db::Database;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBoardRequest {
    #[schema(example = "Release 1.0")]
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateBoardRequest {
    #[schema(example = "Release 1.1")]
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ConnectRepoRequest {
    #[schema(example = "octocat")]
    pub owner: String,
    #[schema(example = "hello-world")]
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddMemberRequest {
    #[schema(example = "grace@example.com")]
    pub email: String,
}

/// Acknowledgement of a deletion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Board removed")]
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/boards",
    tag = "boards",
    responses(
        (status = 200, description = "Boards the user owns or is a member of", body = Vec<BoardSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn list_boards<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<BoardSummary>>, ApiError> {
    let boards = BoardService::new(state.db()).list_boards(&user.id).await?;
    Ok(Json(boards))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards",
    tag = "boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Board created with default lists", body = BoardAggregate),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn create_board<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardAggregate>), ApiError> {
    let Json(req) = payload?;
    let board = BoardService::new(state.db())
        .create_board(&user.id, &req.title)
        .await?;
    Ok((StatusCode::CREATED, Json(board)))
}

#[utoipa::path(
    get,
    path = "/api/v1/boards/{id}",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    responses(
        (status = 200, description = "Board with its lists and tasks", body = BoardAggregate),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_board<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BoardAggregate>, ApiError> {
    let board = BoardService::new(state.db())
        .load_board(&id, &user.id)
        .await?;
    Ok(Json(board))
}

#[utoipa::path(
    put,
    path = "/api/v1/boards/{id}",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    request_body = UpdateBoardRequest,
    responses(
        (status = 200, description = "Board renamed", body = BoardSummary),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 403, description = "Only the owner may rename a board", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn update_board<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBoardRequest>, JsonRejection>,
) -> Result<Json<BoardSummary>, ApiError> {
    let Json(req) = payload?;
    let board = BoardService::new(state.db())
        .update_board_title(&id, &user.id, &req.title)
        .await?;
    Ok(Json(board))
}

#[utoipa::path(
    delete,
    path = "/api/v1/boards/{id}",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    responses(
        (status = 200, description = "Board and all of its lists and tasks deleted", body = DeletedResponse),
        (status = 403, description = "Only the owner may delete a board", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn delete_board<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    BoardService::new(state.db())
        .delete_board(&id, &user.id)
        .await?;
    Ok(Json(DeletedResponse {
        id,
        message: "Board removed".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards/{id}/connect-repo",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    request_body = ConnectRepoRequest,
    responses(
        (status = 200, description = "Repository linked", body = BoardAggregate),
        (status = 400, description = "Missing owner or name", body = ErrorResponse),
        (status = 403, description = "Only the owner may link a repository", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn connect_repo<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ConnectRepoRequest>, JsonRejection>,
) -> Result<Json<BoardAggregate>, ApiError> {
    let Json(req) = payload?;
    let board = BoardService::new(state.db())
        .connect_repo(&id, &user.id, &req.owner, &req.name)
        .await?;
    Ok(Json(board))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards/{id}/members",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = BoardSummary),
        (status = 403, description = "Only the owner may manage members", body = ErrorResponse),
        (status = 404, description = "Board or user not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn add_member<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<Json<BoardSummary>, ApiError> {
    let Json(req) = payload?;
    let board = BoardService::new(state.db())
        .add_member(&id, &user.id, &req.email)
        .await?;
    Ok(Json(board))
}

#[utoipa::path(
    delete,
    path = "/api/v1/boards/{id}/members/{user_id}",
    tag = "boards",
    params(
        ("id" = String, Path, description = "Board ID"),
        ("user_id" = String, Path, description = "Member to remove")
    ),
    responses(
        (status = 200, description = "Member removed", body = BoardSummary),
        (status = 400, description = "The owner cannot be removed", body = ErrorResponse),
        (status = 403, description = "Only the owner may manage members", body = ErrorResponse),
        (status = 404, description = "Board or member not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn remove_member<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<Json<BoardSummary>, ApiError> {
    let board = BoardService::new(state.db())
        .remove_member(&id, &user.id, &member_id)
        .await?;
    Ok(Json(board))
}
