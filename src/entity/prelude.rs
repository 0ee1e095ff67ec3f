pub use super::project::Entity as ProjectEntity;
pub use super::task::Entity as TaskEntity;
pub use super::user::Entity as UserEntity;
pub use super::user_project::Entity as UserProjectEntity;
