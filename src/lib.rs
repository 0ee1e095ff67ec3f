// Library crate for the TaskFlow board backend
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    assign_user_to_project, create_project, create_task, delete_task, get_user_data,
    kanban_socket, list_projects, list_projects_with_details, list_tasks_by_project, list_users,
    login, register, remove_user_from_project, update_task,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Path of the live board channel
pub const LIVE_CHANNEL_PATH: &str = "/ws/kanban";

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // User routes
        .route("/users/", get(list_users))
        .route("/user-data/", get(get_user_data))
        // Project routes
        .route("/projects/", get(list_projects))
        .route("/projects/", post(create_project))
        .route("/projects-with-details/", get(list_projects_with_details))
        // Membership routes
        .route(
            "/projects/{project_id}/users/{user_id}",
            post(assign_user_to_project),
        )
        .route(
            "/projects/{project_id}/users/{user_id}",
            delete(remove_user_from_project),
        )
        // Task routes
        .route("/tasks/", post(create_task))
        .route("/tasks/", get(list_tasks_by_project))
        .route("/tasks", get(list_tasks_by_project))
        .route("/tasks/{task_id}", put(update_task))
        .route("/tasks/{task_id}", delete(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = cors_layer(&state.config.cors_allowed_origin);

    Router::new()
        .route("/", get(|| async { "Hello, TaskFlow!" }))
        // Public auth routes
        .route("/register/", post(register))
        .route("/login/", post(login))
        // Live channel (token checked during upgrade)
        .route(LIVE_CHANNEL_PATH, get(kanban_socket))
        // Protected routes
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
