use serde::Serialize;
use tracing::debug;

use crate::board::{BoardAggregate, MoveState, OptimisticBoard, TaskMove};
use crate::cli::api_client::{ApiClient, error_message};
use crate::cli::commands::board::{fetch_board, format_board_detail};
use crate::cli::error::{CliError, CliResult};
use crate::db::{Priority, Task};

#[derive(Debug, Serialize)]
pub struct CreateTaskRequest<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Append a task to a list
pub async fn create_task(
    api_client: &ApiClient,
    list_id: &str,
    request: CreateTaskRequest<'_>,
) -> CliResult<String> {
    api_client.require_token()?;
    let response = api_client
        .post(&format!("/api/v1/lists/{}/tasks", list_id))
        .json(&request)
        .send()
        .await?;

    let task: Task = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Created task: {} ({}) at position {}",
        task.title, task.id, task.order
    ))
}

/// Move a task between or within lists.
///
/// The move is applied to a local copy of the board first. The server's echo
/// replaces it on success; on any failure the copy is restored and the error
/// is reported.
pub async fn move_task(api_client: &ApiClient, request: TaskMove, format: &str) -> CliResult<String> {
    api_client.require_token()?;
    let response = api_client
        .get(&format!("/api/v1/tasks/{}", request.task_id))
        .send()
        .await?;
    let task: Task = ApiClient::handle_response(response).await?;

    let mut local = OptimisticBoard::new(fetch_board(api_client, &task.board_id).await?);
    send_move(api_client, &mut local, request).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(local.board())?),
        _ => Ok(format_board_detail(local.board())),
    }
}

/// Apply `request` to `local`, send it, then confirm or revert.
pub(crate) async fn send_move(
    api_client: &ApiClient,
    local: &mut OptimisticBoard,
    request: TaskMove,
) -> CliResult<MoveState> {
    let task_id = request.task_id.clone();
    local.begin(request.clone())?;

    match put_move(api_client, &request).await {
        Ok(server) => Ok(local.confirm(&task_id, server)?),
        Err(e) => {
            local.revert(&task_id)?;
            debug!(task_id = %task_id, error = %e, "move reverted");
            Err(e)
        }
    }
}

async fn put_move(api_client: &ApiClient, request: &TaskMove) -> CliResult<BoardAggregate> {
    let response = api_client
        .put(&format!("/api/v1/tasks/{}/move", request.task_id))
        .json(request)
        .send()
        .await?;

    if response.status().is_success() {
        return Ok(response.json().await?);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(CliError::MoveReverted {
        status,
        message: error_message(&body),
    })
}
