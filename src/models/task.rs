use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::UserSummary;

/// Status given to tasks created without one
pub const DEFAULT_TASK_STATUS: &str = "To Do";

/// Task as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assigned_user_id: Option<i32>,
    pub created_by: i32,
    pub created_date: String,
    pub modified_date: String,
}

#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assigned_user_id: Option<i32>,
    pub created_by: i32,
    pub created_date: String,
    pub modified_date: String,
}

/// Partial task update. `None` leaves a field untouched; for
/// `assigned_user_id`, `Some(None)` clears the assignee.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub project_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assigned_user_id: Option<Option<i32>>,
}

/// Task with assignee and creator expanded, as shown on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assigned_user: Option<UserSummary>,
    pub created_by: UserSummary,
    pub created_date: String,
    pub modified_date: String,
}

/// One row of `tasks LEFT JOIN users (assignee) LEFT JOIN users (creator)`
#[derive(Debug, Clone, FromQueryResult)]
pub struct TaskDetailRow {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_date: String,
    pub modified_date: String,
    pub assigned_user_id: Option<i32>,
    pub assigned_username: Option<String>,
    pub created_by_id: i32,
    pub created_by_username: Option<String>,
}

impl From<TaskDetailRow> for TaskDetail {
    fn from(row: TaskDetailRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status: row.status,
            assigned_user: user_ref(row.assigned_user_id, row.assigned_username),
            created_by: UserSummary {
                id: row.created_by_id,
                username: row.created_by_username.unwrap_or_default(),
            },
            created_date: row.created_date,
            modified_date: row.modified_date,
        }
    }
}

/// Build a user reference from a nullable joined id/username pair
pub fn user_ref(id: Option<i32>, username: Option<String>) -> Option<UserSummary> {
    id.map(|id| UserSummary {
        id,
        username: username.unwrap_or_default(),
    })
}

/// Current UTC time as an RFC 3339 string
pub fn now_timestamp() -> AppResult<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::Internal(format!("Timestamp formatting failed: {}", e)))
}
