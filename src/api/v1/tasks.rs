//! Task management handlers, including drag-and-drop moves.

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
use crate::board::{BoardAggregate, BoardService, NewTask, TaskChanges, TaskMove};
use crate::db::{Database, Priority, Task, TaskStatus};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[schema(example = "Write release notes")]
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    #[schema(example = "2025-06-30")]
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority: req.priority,
            status: req.status,
        }
    }
}

/// Partial task update. An empty `due_date` clears it.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[schema(example = "Write better release notes")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "2025-07-15")]
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority: req.priority,
            status: req.status,
        }
    }
}

/// A drag-and-drop move. `taskId` defaults to the task in the path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    #[schema(example = "a1b2c3d4")]
    pub task_id: Option<String>,
    #[schema(example = "e5f6a7b8")]
    pub source_list_id: String,
    #[schema(example = "c9d0e1f2")]
    pub target_list_id: String,
    #[schema(example = 1)]
    pub source_index: usize,
    #[schema(example = 0)]
    pub destination_index: usize,
}

impl MoveTaskRequest {
    fn into_move(self, path_task_id: &str) -> TaskMove {
        TaskMove {
            task_id: self.task_id.unwrap_or_else(|| path_task_id.to_string()),
            source_list_id: self.source_list_id,
            target_list_id: self.target_list_id,
            source_index: self.source_index,
            destination_index: self.destination_index,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/v1/lists/{id}/tasks",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "List ID")
    ),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task appended to the list", body = Task),
        (status = 400, description = "Missing title or invalid due date", body = ErrorResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn create_task<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(list_id): Path<String>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload?;
    let task = BoardService::new(state.db())
        .create_task(&list_id, &user.id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn get_task<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = BoardService::new(state.db()).get_task(&id, &user.id).await?;
    Ok(Json(task))
}

#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Empty title or invalid due date", body = ErrorResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn update_task<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(req) = payload?;
    let task = BoardService::new(state.db())
        .update_task(&id, &user.id, req.into())
        .await?;
    Ok(Json(task))
}

/// Move a task within or between lists of one board
///
/// Returns the whole board after the move. A 500 response means the board
/// may have changed; clients should reload it rather than retry.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}/move",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = MoveTaskRequest,
    responses(
        (status = 200, description = "Board after the move", body = BoardAggregate),
        (status = 400, description = "Missing fields, stale indices or lists on different boards", body = ErrorResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Task or list not found", body = ErrorResponse),
        (status = 500, description = "Move could not be persisted; reload the board", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state, payload))]
pub async fn move_task<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<MoveTaskRequest>, JsonRejection>,
) -> Result<Json<BoardAggregate>, ApiError> {
    let Json(req) = payload?;
    let request = req.into_move(&id);
    let board = BoardService::new(state.db())
        .move_task(&id, &user.id, &request)
        .await?;
    Ok(Json(board))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = DeletedResponse),
        (status = 403, description = "Not an owner or member", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[instrument(skip(state))]
pub async fn delete_task<D: Database>(
    State(state): State<AppState<D>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    BoardService::new(state.db())
        .delete_task(&id, &user.id)
        .await?;
    Ok(Json(DeletedResponse {
        id,
        message: "Task removed".to_string(),
    }))
}
