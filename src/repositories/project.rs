use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryOrder, Set, Statement, TransactionTrait,
};

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::error::AppResult;
use crate::models::{CreateProject, Project, ProjectDetail, ProjectDetailRow};
use crate::repositories::Repository;
use crate::services::assemble_projects;

// Left joins keep projects with no members or no tasks
const PROJECT_DETAILS_SQL: &str = r#"
    SELECT
        p.id AS project_id,
        p.name AS project_name,
        p.description AS project_description,
        m.id AS member_id,
        m.username AS member_username,
        t.id AS task_id,
        t.title AS task_title,
        t.description AS task_description,
        t.status AS task_status,
        t.created_date AS task_created_date,
        t.modified_date AS task_modified_date,
        au.id AS assigned_user_id,
        au.username AS assigned_username,
        cu.id AS created_by_id,
        cu.username AS created_by_username
    FROM projects p
    LEFT JOIN user_projects up ON up.project_id = p.id
    LEFT JOIN users m ON m.id = up.user_id
    LEFT JOIN tasks t ON t.project_id = p.id
    LEFT JOIN users au ON au.id = t.assigned_user_id
    LEFT JOIN users cu ON cu.id = t.created_by
    ORDER BY p.id, m.id, t.id
"#;

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let count = ProjectEntity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

impl ProjectRepository {
    /// Create a new project
    pub async fn create(db: &DatabaseConnection, input: &CreateProject) -> AppResult<Project> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            ..Default::default()
        };

        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into())
    }

    /// Every project with its members and tasks, from a single joined query
    pub async fn list_with_details(db: &DatabaseConnection) -> AppResult<Vec<ProjectDetail>> {
        let stmt = Statement::from_string(db.get_database_backend(), PROJECT_DETAILS_SQL);
        let rows = ProjectDetailRow::find_by_statement(stmt).all(db).await?;

        Ok(assemble_projects(rows))
    }
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }
}
