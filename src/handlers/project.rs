use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{validate_max_len, validate_required, AppJson};
use crate::middlewares::AuthUser;
use crate::models::{CreateProject, Project, ProjectDetail};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProjectResponse {
    pub message: String,
    pub project: Project,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailListResponse {
    pub projects: Vec<ProjectDetail>,
}

// ============ Handlers ============

/// Create a new project
#[utoipa::path(
    post,
    path = "/projects/",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = CreateProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRequest>,
) -> AppResult<Json<CreateProjectResponse>> {
    validate_required(&payload.name, "Name", 100)?;
    validate_max_len(&payload.description, "Description", 1000)?;

    let create_project = CreateProject {
        name: payload.name,
        description: payload.description,
    };

    let project = ProjectRepository::create(&state.db, &create_project).await?;
    tracing::info!("Project {} created by {}", project.id, user.username);

    Ok(Json(CreateProjectResponse {
        message: "Project created successfully".to_string(),
        project,
    }))
}

/// List all projects
#[utoipa::path(
    get,
    path = "/projects/",
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProjectListResponse>> {
    let projects = ProjectRepository::list(&state.db).await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// List all projects with their members and tasks
#[utoipa::path(
    get,
    path = "/projects-with-details/",
    responses(
        (status = 200, description = "Projects with members and tasks", body = ProjectDetailListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects_with_details(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProjectDetailListResponse>> {
    let projects = ProjectRepository::list_with_details(&state.db).await?;
    Ok(Json(ProjectDetailListResponse { projects }))
}
