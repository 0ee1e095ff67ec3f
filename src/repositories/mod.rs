pub mod membership;
pub mod project;
pub mod task;
pub mod user;

pub use membership::MembershipRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Read operations shared by the top-level resources
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Check whether an entity with this ID exists
    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool>;

    /// List all entities in ID order
    async fn list(db: &DatabaseConnection) -> AppResult<Vec<T>>;
}
