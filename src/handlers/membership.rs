use axum::{
    extract::State,
    Json,
};

use crate::error::AppResult;
use crate::handlers::{AppPath, MessageResponse};
use crate::middlewares::AuthUser;
use crate::repositories::MembershipRepository;
use crate::state::AppState;

/// Assign a user to a project
#[utoipa::path(
    post,
    path = "/projects/{project_id}/users/{user_id}",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User assigned", body = MessageResponse),
        (status = 400, description = "User is already assigned to this project"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project or user not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Members"
)]
pub async fn assign_user_to_project(
    _user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, user_id)): AppPath<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    let membership = MembershipRepository::add(&state.db, project_id, user_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} assigned to project {}",
        membership.user_id, membership.project_id
    ))))
}

/// Remove a user from a project
#[utoipa::path(
    delete,
    path = "/projects/{project_id}/users/{user_id}",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User is not part of the project")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Members"
)]
pub async fn remove_user_from_project(
    _user: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, user_id)): AppPath<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    MembershipRepository::remove(&state.db, project_id, user_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} removed from project {}",
        user_id, project_id
    ))))
}
