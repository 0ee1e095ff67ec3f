use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, Set,
    Statement, TransactionTrait,
};

use crate::entity::task::{self, ActiveModel, Entity as TaskEntity};
use crate::error::{AppError, AppResult};
use crate::models::{now_timestamp, CreateTask, Task, TaskDetail, TaskDetailRow, UpdateTask};
use crate::repositories::{ProjectRepository, Repository};

const TASK_DETAILS_SQL: &str = r#"
    SELECT
        t.id AS id,
        t.project_id AS project_id,
        t.title AS title,
        t.description AS description,
        t.status AS status,
        t.created_date AS created_date,
        t.modified_date AS modified_date,
        au.id AS assigned_user_id,
        au.username AS assigned_username,
        t.created_by AS created_by_id,
        cu.username AS created_by_username
    FROM tasks t
    LEFT JOIN users au ON au.id = t.assigned_user_id
    LEFT JOIN users cu ON cu.id = t.created_by
    WHERE t.project_id = ?
    ORDER BY t.id
"#;

/// Task repository for database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task
    pub async fn create(db: &DatabaseConnection, input: &CreateTask) -> AppResult<Task> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            project_id: Set(input.project_id),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            status: Set(input.status.clone()),
            assigned_user_id: Set(input.assigned_user_id),
            created_by: Set(input.created_by),
            created_date: Set(input.created_date.clone()),
            modified_date: Set(input.modified_date.clone()),
            ..Default::default()
        };

        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into())
    }

    /// Apply a partial update. `modified_date` is always refreshed.
    pub async fn update(db: &DatabaseConnection, id: i32, input: &UpdateTask) -> AppResult<Task> {
        let txn = db.begin().await?;

        let model = TaskEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(project_id) = input.project_id {
            active.project_id = Set(project_id);
        }
        if let Some(title) = &input.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }
        if let Some(status) = &input.status {
            active.status = Set(status.clone());
        }
        if let Some(assigned_user_id) = input.assigned_user_id {
            active.assigned_user_id = Set(assigned_user_id);
        }
        active.modified_date = Set(now_timestamp()?);

        let result = active.update(&txn).await?;
        txn.commit().await?;

        Ok(result.into())
    }

    /// Delete a task
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let result = TaskEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Task".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }

    /// Tasks of a project with assignee and creator expanded
    pub async fn list_by_project(
        db: &DatabaseConnection,
        project_id: i32,
    ) -> AppResult<Vec<TaskDetail>> {
        if !ProjectRepository::exists(db, project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            TASK_DETAILS_SQL,
            [project_id.into()],
        );
        let rows = TaskDetailRow::find_by_statement(stmt).all(db).await?;

        Ok(rows.into_iter().map(TaskDetail::from).collect())
    }
}

// Conversion from SeaORM model to our domain model
impl From<task::Model> for Task {
    fn from(m: task::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            title: m.title,
            description: m.description,
            status: m.status,
            assigned_user_id: m.assigned_user_id,
            created_by: m.created_by,
            created_date: m.created_date,
            modified_date: m.modified_date,
        }
    }
}
