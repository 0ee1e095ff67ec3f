use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};

use crate::entity::user_project::{ActiveModel, Column, Entity as UserProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::Membership;
use crate::repositories::{ProjectRepository, Repository, UserRepository};

/// Project membership repository
pub struct MembershipRepository;

impl MembershipRepository {
    /// Add a user to a project; a pair can only be added once
    pub async fn add(db: &DatabaseConnection, project_id: i32, user_id: i32) -> AppResult<Membership> {
        if !ProjectRepository::exists(db, project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }
        if !UserRepository::exists(db, user_id).await? {
            return Err(AppError::NotFound("User".to_string()));
        }

        let txn = db.begin().await?;

        let model = ActiveModel {
            user_id: Set(user_id),
            project_id: Set(project_id),
        };

        UserProjectEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict("User is already assigned to this project".to_string())
                }
                _ => AppError::from(e),
            })?;

        txn.commit().await?;
        Ok(Membership {
            user_id,
            project_id,
        })
    }

    /// Remove a user from a project
    pub async fn remove(db: &DatabaseConnection, project_id: i32, user_id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let result = UserProjectEntity::delete_many()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User is not part of the project".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }

    /// Number of rows recorded for a pair (0 or 1)
    pub async fn count(db: &DatabaseConnection, project_id: i32, user_id: i32) -> AppResult<u64> {
        let count = UserProjectEntity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count)
    }
}
