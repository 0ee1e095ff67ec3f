use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;
use crate::handlers::AppQuery;
use crate::middlewares::AuthUser;
use crate::models::{Project, UserSummary};
use crate::repositories::{Repository, UserRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserDataQuery {
    /// Defaults to the authenticated user
    pub user_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDataResponse {
    pub projects: Vec<Project>,
    pub team_members: Vec<UserSummary>,
}

// ============ Handlers ============

/// List all users
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn list_users(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserListResponse>> {
    let users = UserRepository::list(&state.db).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserSummary::from).collect(),
    }))
}

/// Projects and team members of a user
#[utoipa::path(
    get,
    path = "/user-data/",
    params(UserDataQuery),
    responses(
        (status = 200, description = "User projects and team", body = UserDataResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn get_user_data(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserDataQuery>,
) -> AppResult<Json<UserDataResponse>> {
    let user_id = params.user_id.unwrap_or(user.id);
    tracing::info!("Fetching data for user_id: {}", user_id);

    let projects = UserRepository::projects(&state.db, user_id).await?;
    let team_members = UserRepository::team_members(&state.db, user_id).await?;

    Ok(Json(UserDataResponse {
        projects,
        team_members,
    }))
}
