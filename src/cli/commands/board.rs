use serde::Serialize;
use tabled::{Table, Tabled};

use crate::board::{BoardAggregate, BoardSummary};
use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_members, truncate_with_ellipsis};
use crate::db::Task;

#[derive(Debug, Serialize)]
pub struct CreateBoardRequest<'a> {
    pub title: &'a str,
}

#[derive(Tabled)]
struct BoardDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Repository")]
    repo: String,
}

impl From<&BoardSummary> for BoardDisplay {
    fn from(board: &BoardSummary) -> Self {
        Self {
            id: board.id.clone(),
            title: truncate_with_ellipsis(&board.title, 40),
            owner: board.owner.name.clone(),
            members: truncate_with_ellipsis(&format_members(&board.members), 40),
            repo: board
                .github_repo
                .as_ref()
                .map(|r| format!("{}/{}", r.owner, r.name))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub(crate) struct TaskDisplay {
    #[tabled(rename = "#")]
    pub(crate) position: i64,
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Priority")]
    pub(crate) priority: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
    #[tabled(rename = "Due")]
    pub(crate) due: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            position: task.order,
            id: task.id.clone(),
            title: truncate_with_ellipsis(&task.title, 50),
            priority: task.priority.to_string(),
            status: task.status.to_string(),
            due: task.due_date.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List the boards the current user owns or is a member of
pub async fn list_boards(api_client: &ApiClient, format: &str) -> CliResult<String> {
    api_client.require_token()?;
    let response = api_client.get("/api/v1/boards").send().await?;
    let boards: Vec<BoardSummary> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&boards)?),
        _ => Ok(format_table(&boards)),
    }
}

fn format_table(boards: &[BoardSummary]) -> String {
    if boards.is_empty() {
        return "No boards found.".to_string();
    }

    let display: Vec<BoardDisplay> = boards.iter().map(|b| b.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Fetch the full board: lists and their tasks in order
pub async fn fetch_board(api_client: &ApiClient, id: &str) -> CliResult<BoardAggregate> {
    api_client.require_token()?;
    let response = api_client
        .get(&format!("/api/v1/boards/{}", id))
        .send()
        .await?;
    ApiClient::handle_response(response).await
}

/// Show a board with every list and task
pub async fn show_board(api_client: &ApiClient, id: &str, format: &str) -> CliResult<String> {
    let board = fetch_board(api_client, id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&board)?),
        _ => Ok(format_board_detail(&board)),
    }
}

pub(crate) fn format_board_detail(board: &BoardAggregate) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Board ID", &board.id]);
    builder.push_record(["Title", &board.title]);
    builder.push_record([
        "Owner",
        &format!("{} <{}>", board.owner.name, board.owner.email),
    ]);
    builder.push_record(["Members", &format_members(&board.members)]);
    if let Some(repo) = &board.github_repo {
        builder.push_record(["Repository", &format!("{}/{}", repo.owner, repo.name)]);
    }
    builder.push_record(["Updated", &board.updated_at]);

    let mut header = builder.build();
    apply_table_style(&mut header);

    let mut out = header.to_string();
    for list in &board.lists {
        out.push_str(&format!("\n\n{} ({})\n", list.title, list.id));
        if list.tasks.is_empty() {
            out.push_str("  (empty)");
            continue;
        }
        let rows: Vec<TaskDisplay> = list.tasks.iter().map(|t| t.into()).collect();
        let mut table = Table::new(rows);
        apply_table_style(&mut table);
        out.push_str(&table.to_string());
    }
    out
}

/// Create a board; the server adds the default lists
pub async fn create_board(api_client: &ApiClient, title: &str) -> CliResult<String> {
    api_client.require_token()?;
    let response = api_client
        .post("/api/v1/boards")
        .json(&CreateBoardRequest { title })
        .send()
        .await?;

    let board: BoardAggregate = ApiClient::handle_response(response).await?;
    let lists: Vec<&str> = board.lists.iter().map(|l| l.title.as_str()).collect();
    Ok(format!(
        "✓ Created board: {} ({})\n  Lists: {}",
        board.title,
        board.id,
        lists.join(", ")
    ))
}
