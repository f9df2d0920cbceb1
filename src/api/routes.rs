//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::state::AppState;
use super::v1::{
    self, AddMemberRequest, ConnectRepoRequest, CreateBoardRequest, CreateListRequest,
    CreateTaskRequest, DeletedResponse, HealthResponse, LoginRequest, MoveTaskRequest,
    RegisterRequest, UpdateBoardRequest, UpdateListRequest, UpdateTaskRequest,
};
use crate::board::{BoardAggregate, BoardSummary, IssuedToken, ListAggregate};
use crate::db::{Database, GithubRepo, List, Priority, Task, TaskStatus, UserSummary};

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mrello API",
        version = "0.3.0",
        description = "Kanban boards, lists and tasks with drag-and-drop ordering",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::root,
        v1::health,
        v1::register,
        v1::login,
        v1::me,
        v1::list_boards,
        v1::create_board,
        v1::get_board,
        v1::update_board,
        v1::delete_board,
        v1::connect_repo,
        v1::add_member,
        v1::remove_member,
        v1::create_list,
        v1::update_list,
        v1::delete_list,
        v1::create_task,
        v1::get_task,
        v1::update_task,
        v1::move_task,
        v1::delete_task,
        v1::github_webhook,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            DeletedResponse,
            RegisterRequest,
            LoginRequest,
            IssuedToken,
            UserSummary,
            GithubRepo,
            BoardSummary,
            BoardAggregate,
            ListAggregate,
            CreateBoardRequest,
            UpdateBoardRequest,
            ConnectRepoRequest,
            AddMemberRequest,
            List,
            CreateListRequest,
            UpdateListRequest,
            Task,
            Priority,
            TaskStatus,
            CreateTaskRequest,
            UpdateTaskRequest,
            MoveTaskRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "users", description = "Registration, login and identity"),
        (name = "boards", description = "Board management endpoints"),
        (name = "lists", description = "List management endpoints"),
        (name = "tasks", description = "Task management and move endpoints"),
        (name = "webhooks", description = "Inbound GitHub webhooks")
    )
)]
pub struct ApiDoc;

/// Create the API router, optionally serving the OpenAPI reference at /docs.
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(v1::root))
        .route("/health", get(v1::health));

    let user_routes = routes!(D => {
        post "/api/v1/users/register" => v1::register,
        post "/api/v1/users/login" => v1::login,
        get "/api/v1/users/me" => v1::me,
    });

    let board_routes = routes!(D => {
        get "/api/v1/boards" => v1::list_boards,
        post "/api/v1/boards" => v1::create_board,
        get "/api/v1/boards/{id}" => v1::get_board,
        put "/api/v1/boards/{id}" => v1::update_board,
        delete "/api/v1/boards/{id}" => v1::delete_board,
        post "/api/v1/boards/{id}/connect-repo" => v1::connect_repo,
        post "/api/v1/boards/{id}/members" => v1::add_member,
        delete "/api/v1/boards/{id}/members/{user_id}" => v1::remove_member,
    });

    let list_routes = routes!(D => {
        post "/api/v1/boards/{id}/lists" => v1::create_list,
        put "/api/v1/lists/{id}" => v1::update_list,
        delete "/api/v1/lists/{id}" => v1::delete_list,
    });

    let task_routes = routes!(D => {
        post "/api/v1/lists/{id}/tasks" => v1::create_task,
        get "/api/v1/tasks/{id}" => v1::get_task,
        put "/api/v1/tasks/{id}" => v1::update_task,
        put "/api/v1/tasks/{id}/move" => v1::move_task,
        delete "/api/v1/tasks/{id}" => v1::delete_task,
    });

    let webhook_routes = routes!(D => {
        post "/api/v1/webhooks/github" => v1::github_webhook,
    });

    let router = system_routes
        .merge(user_routes)
        .merge(board_routes)
        .merge(list_routes)
        .merge(task_routes)
        .merge(webhook_routes);

    let router = if enable_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state)
}
