use crate::cli::commands::board::*;
use crate::cli::commands::test_support::{new_board, signed_in, spawn_test_server};
use crate::cli::error::CliError;

#[tokio::test(flavor = "multi_thread")]
async fn test_create_board_reports_default_lists() {
    let (url, _handle) = spawn_test_server().await;
    let (client, _) = signed_in(&url, "Ada", "ada@example.com").await;

    let output = create_board(&client, "Release 1.0").await.unwrap();
    assert!(output.starts_with("✓ Created board: Release 1.0 ("));
    assert!(output.contains("Lists: To Do, In Progress, Done"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_boards_empty_and_populated() {
    let (url, _handle) = spawn_test_server().await;
    let (client, _) = signed_in(&url, "Ada", "ada@example.com").await;

    let output = list_boards(&client, "table").await.unwrap();
    assert_eq!(output, "No boards found.");

    let board = new_board(&client, "Release 1.0").await;
    let output = list_boards(&client, "table").await.unwrap();
    assert!(output.contains(&board.id));
    assert!(output.contains("Release 1.0"));
    assert!(output.contains("Ada"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_boards_only_shows_accessible_boards() {
    let (url, _handle) = spawn_test_server().await;
    let (ada, _) = signed_in(&url, "Ada", "ada@example.com").await;
    let (grace, _) = signed_in(&url, "Grace", "grace@example.com").await;

    new_board(&ada, "Private").await;

    let output = list_boards(&grace, "json").await.unwrap();
    let boards: Vec<crate::board::BoardSummary> = serde_json::from_str(&output).unwrap();
    assert!(boards.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_board_renders_lists_in_order() {
    let (url, _handle) = spawn_test_server().await;
    let (client, _) = signed_in(&url, "Ada", "ada@example.com").await;
    let board = new_board(&client, "Release 1.0").await;

    let output = show_board(&client, &board.id, "table").await.unwrap();
    assert!(output.contains("Release 1.0"));
    let todo = output.find("To Do (").unwrap();
    let doing = output.find("In Progress (").unwrap();
    let done = output.find("Done (").unwrap();
    assert!(todo < doing && doing < done);
    assert!(output.contains("(empty)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_board_json_round_trips_aggregate() {
    let (url, _handle) = spawn_test_server().await;
    let (client, _) = signed_in(&url, "Ada", "ada@example.com").await;
    let board = new_board(&client, "Release 1.0").await;

    let output = show_board(&client, &board.id, "json").await.unwrap();
    let shown: crate::board::BoardAggregate = serde_json::from_str(&output).unwrap();
    assert_eq!(shown, board);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_board_of_stranger_is_forbidden() {
    let (url, _handle) = spawn_test_server().await;
    let (ada, _) = signed_in(&url, "Ada", "ada@example.com").await;
    let (grace, _) = signed_in(&url, "Grace", "grace@example.com").await;
    let board = new_board(&ada, "Private").await;

    let err = show_board(&grace, &board.id, "table").await.unwrap_err();
    assert!(matches!(err, CliError::ApiError { status: 403, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_missing_board_is_not_found() {
    let (url, _handle) = spawn_test_server().await;
    let (client, _) = signed_in(&url, "Ada", "ada@example.com").await;

    let err = show_board(&client, "deadbeef", "table").await.unwrap_err();
    match err {
        CliError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Board not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
