use anyhow::Context;
use tracing_subscriber::EnvFilter;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use taskflow::config::{Config, LogFormat};
use taskflow::handlers::{
    AuthResponse, CreateProjectRequest, CreateProjectResponse, CreateTaskRequest,
    CreateTaskResponse, LoginRequest, MessageResponse, ProjectDetailListResponse,
    ProjectListResponse, RegisterRequest, RegisterResponse, UpdateTaskRequest, UserDataResponse,
    UserListResponse,
};
use taskflow::models::{Project, ProjectDetail, Task, TaskDetail, UserSummary};
use taskflow::state::AppState;
use taskflow::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::user::list_users,
        handlers::user::get_user_data,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::list_projects_with_details,
        handlers::membership::assign_user_to_project,
        handlers::membership::remove_user_from_project,
        handlers::task::create_task,
        handlers::task::update_task,
        handlers::task::delete_task,
        handlers::task::list_tasks_by_project,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        AuthResponse,
        MessageResponse,
        UserSummary,
        UserListResponse,
        UserDataResponse,
        Project,
        ProjectDetail,
        CreateProjectRequest,
        CreateProjectResponse,
        ProjectListResponse,
        ProjectDetailListResponse,
        Task,
        TaskDetail,
        CreateTaskRequest,
        CreateTaskResponse,
        UpdateTaskRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User listing and per-user board data"),
        (name = "Projects", description = "Project management endpoints"),
        (name = "Members", description = "Project membership endpoints"),
        (name = "Tasks", description = "Task management endpoints")
    )
)]
struct ApiDoc;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);
    let addr = config.server_addr();

    // Initialize application state (opens the pool and runs migrations)
    tracing::info!("Connecting to database {}", config.database_url);
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database ready");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
