use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, Statement,
    TransactionTrait,
};

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::entity::ProjectEntity;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, Project, User, UserSummary};
use crate::repositories::Repository;

const TEAM_MEMBERS_SQL: &str = r#"
    SELECT DISTINCT u.id AS id, u.username AS username
    FROM users u
    JOIN user_projects up ON u.id = up.user_id
    WHERE up.project_id IN (SELECT project_id FROM user_projects WHERE user_id = ?)
    ORDER BY u.id
"#;

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let count = UserEntity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

// User-specific methods (not in the base trait)
impl UserRepository {
    /// Create a new user
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            username: Set(input.username.clone()),
            password: Set(password_hash.to_string()),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Username already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        txn.commit().await?;
        Ok(result.into())
    }

    /// Find user by username (for login)
    pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Projects the user is a member of
    pub async fn projects(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<Project>> {
        let model = UserEntity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let projects = model
            .find_related(ProjectEntity)
            .order_by_asc(crate::entity::project::Column::Id)
            .all(db)
            .await?;

        Ok(projects.into_iter().map(|p| p.into()).collect())
    }

    /// Everyone sharing at least one project with the user, the user included
    pub async fn team_members(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<UserSummary>> {
        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            TEAM_MEMBERS_SQL,
            [user_id.into()],
        );

        let members = UserSummary::find_by_statement(stmt).all(db).await?;
        Ok(members)
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            password_hash: m.password,
        }
    }
}
