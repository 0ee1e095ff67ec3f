use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{TaskDetail, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
}

/// Project with its members and tasks
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProjectDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub users: Vec<UserSummary>,
    pub tasks: Vec<TaskDetail>,
}

/// One row of `projects LEFT JOIN members LEFT JOIN tasks`.
///
/// Member and task columns are `NULL` when the project has no members or
/// no tasks respectively.
#[derive(Debug, Clone, Default, FromQueryResult)]
pub struct ProjectDetailRow {
    pub project_id: i32,
    pub project_name: String,
    pub project_description: Option<String>,

    pub member_id: Option<i32>,
    pub member_username: Option<String>,

    pub task_id: Option<i32>,
    pub task_title: Option<String>,
    pub task_description: Option<String>,
    pub task_status: Option<String>,
    pub task_created_date: Option<String>,
    pub task_modified_date: Option<String>,
    pub assigned_user_id: Option<i32>,
    pub assigned_username: Option<String>,
    pub created_by_id: Option<i32>,
    pub created_by_username: Option<String>,
}
