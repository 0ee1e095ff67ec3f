use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;
use crate::handlers::{
    validate_max_len, validate_optional, validate_required, AppJson, AppPath, AppQuery,
    MessageResponse,
};
use crate::middlewares::AuthUser;
use crate::models::{
    now_timestamp, CreateTask, Task, TaskDetail, UpdateTask, DEFAULT_TASK_STATUS,
};
use crate::repositories::TaskRepository;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub project_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    pub assigned_user_id: Option<i32>,
    /// Defaults to the authenticated user
    pub created_by: Option<i32>,
    /// ISO-8601; defaults to now
    pub created_date: Option<String>,
    /// ISO-8601; defaults to now
    pub modified_date: Option<String>,
}

/// Partial update; absent fields are left untouched and unknown keys are rejected
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskRequest {
    pub project_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// `null` clears the assignee
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub assigned_user_id: Option<Option<i32>>,
}

/// Distinguishes an explicit `null` from an absent key
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTaskResponse {
    pub message: String,
    pub task: Task,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    pub project_id: i32,
}

// ============ Handlers ============

/// Create a new task
#[utoipa::path(
    post,
    path = "/tasks/",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task created successfully", body = CreateTaskResponse),
        (status = 400, description = "Validation error or unknown project/user"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTaskRequest>,
) -> AppResult<Json<CreateTaskResponse>> {
    validate_required(&payload.title, "Title", 200)?;
    validate_max_len(&payload.status, "Status", 50)?;

    let now = now_timestamp()?;
    let create_task = CreateTask {
        project_id: payload.project_id,
        title: payload.title,
        description: payload.description,
        status: payload
            .status
            .unwrap_or_else(|| DEFAULT_TASK_STATUS.to_string()),
        assigned_user_id: payload.assigned_user_id,
        created_by: payload.created_by.unwrap_or(user.id),
        created_date: payload.created_date.unwrap_or_else(|| now.clone()),
        modified_date: payload.modified_date.unwrap_or(now),
    };

    let task = TaskRepository::create(&state.db, &create_task).await?;

    Ok(Json(CreateTaskResponse {
        message: "Task created successfully".to_string(),
        task,
    }))
}

/// Update a task; `modified_date` is always refreshed
#[utoipa::path(
    put,
    path = "/tasks/{task_id}",
    params(
        ("task_id" = i32, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn update_task(
    _user: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    validate_optional(&payload.title, "Title", 200)?;
    validate_max_len(&payload.status, "Status", 50)?;

    let update_task = UpdateTask {
        project_id: payload.project_id,
        title: payload.title,
        description: payload.description,
        status: payload.status,
        assigned_user_id: payload.assigned_user_id,
    };

    let task = TaskRepository::update(&state.db, task_id, &update_task).await?;
    tracing::debug!("Task {} updated, modified_date={}", task.id, task.modified_date);

    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    params(
        ("task_id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn delete_task(
    _user: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    TaskRepository::delete(&state.db, task_id).await?;
    Ok(Json(MessageResponse::new(format!("Task {} deleted", task_id))))
}

/// List the tasks of a project with assignee and creator expanded
#[utoipa::path(
    get,
    path = "/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks of the project", body = Vec<TaskDetail>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_by_project(
    _user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListQuery>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepository::list_by_project(&state.db, params.project_id).await?;
    Ok(Json(tasks))
}
