pub mod auth;
pub mod common;
pub mod live;
pub mod membership;
pub mod project;
pub mod task;
pub mod user;

pub use auth::{login, register, AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};
pub use common::{
    validate_max_len, validate_optional, validate_required, AppJson, AppPath, AppQuery,
    MessageResponse,
};
pub use live::kanban_socket;
pub use membership::{assign_user_to_project, remove_user_from_project};
pub use project::{
    create_project, list_projects, list_projects_with_details, CreateProjectRequest,
    CreateProjectResponse, ProjectDetailListResponse, ProjectListResponse,
};
pub use task::{
    create_task, delete_task, list_tasks_by_project, update_task, CreateTaskRequest,
    CreateTaskResponse, UpdateTaskRequest,
};
pub use user::{get_user_data, list_users, UserDataResponse, UserListResponse};
