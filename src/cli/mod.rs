//! The `mrello` command line: runs the server and drives boards over HTTP.

pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod api_client_test;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::board::TaskMove;
use crate::db::Priority;
use api_client::ApiClient;
use commands::serve::ServeOptions;
use error::CliResult;

#[derive(Parser)]
#[command(name = "mrello")]
#[command(author, version, about = "Kanban boards with drag-and-drop task ordering", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: MRELLO_API_URL env or http://localhost:5001)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (default: MRELLO_TOKEN env)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// SQLite database file (default: MRELLO_DB env or the XDG data directory)
        #[arg(long)]
        db: Option<PathBuf>,
        /// GitHub webhook secret (default: MRELLO_GITHUB_WEBHOOK_SECRET env)
        #[arg(long)]
        webhook_secret: Option<String>,
        /// Serve the API reference at /docs
        #[arg(long)]
        docs: bool,
        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Create an account and print its token
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Log in and print a fresh token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the account behind the token
    Whoami,
    /// Board commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Task commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum BoardCommands {
    /// List boards you own or belong to
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a board with its lists and tasks
    Show {
        /// Board ID
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a board with the default lists
    Create {
        /// Board title
        title: String,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Append a task to a list
    Create {
        /// List ID
        list_id: String,
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
        /// Low, Medium or High
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Move a task to a position in the same or another list
    Move {
        /// Task ID
        task_id: String,
        /// Source list ID
        #[arg(long)]
        from: String,
        /// Target list ID
        #[arg(long)]
        to: String,
        /// Current zero-based position in the source list
        #[arg(long)]
        from_index: usize,
        /// Zero-based position in the target list
        #[arg(long)]
        to_index: usize,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

pub async fn run() -> miette::Result<()> {
    // reqwest is built without a default crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let api_client = ApiClient::new(cli.api_url, cli.token);

    match cli.command {
        Some(command) => println!("{}", dispatch(&api_client, command).await?),
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["mrello", "--help"]);
        }
    }

    Ok(())
}

async fn dispatch(api_client: &ApiClient, command: Commands) -> CliResult<String> {
    match command {
        Commands::Serve {
            host,
            port,
            db,
            webhook_secret,
            docs,
            verbose,
        } => {
            commands::serve::run(ServeOptions {
                host,
                port,
                db,
                webhook_secret,
                enable_docs: docs,
                verbosity: verbose,
            })
            .await?;
            Ok("Server stopped.".to_string())
        }
        Commands::Register {
            name,
            email,
            password,
            format,
        } => {
            commands::user::register(
                api_client,
                commands::user::RegisterRequest {
                    name: &name,
                    email: &email,
                    password: &password,
                },
                &format,
            )
            .await
        }
        Commands::Login {
            email,
            password,
            format,
        } => {
            commands::user::login(
                api_client,
                commands::user::LoginRequest {
                    email: &email,
                    password: &password,
                },
                &format,
            )
            .await
        }
        Commands::Whoami => commands::user::whoami(api_client).await,
        Commands::Board { command } => match command {
            BoardCommands::List { format } => commands::board::list_boards(api_client, &format).await,
            BoardCommands::Show { id, format } => {
                commands::board::show_board(api_client, &id, &format).await
            }
            BoardCommands::Create { title } => {
                commands::board::create_board(api_client, &title).await
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::Create {
                list_id,
                title,
                description,
                due,
                priority,
            } => {
                commands::task::create_task(
                    api_client,
                    &list_id,
                    commands::task::CreateTaskRequest {
                        title: &title,
                        description: description.as_deref(),
                        due_date: due.as_deref(),
                        priority,
                    },
                )
                .await
            }
            TaskCommands::Move {
                task_id,
                from,
                to,
                from_index,
                to_index,
                format,
            } => {
                commands::task::move_task(
                    api_client,
                    TaskMove {
                        task_id,
                        source_list_id: from,
                        target_list_id: to,
                        source_index: from_index,
                        destination_index: to_index,
                    },
                    &format,
                )
                .await
            }
        },
    }
}
