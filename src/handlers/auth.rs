use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::{validate_required, AppJson};
use crate::models::{CreateUser, UserSummary};
use crate::repositories::UserRepository;
use crate::services::AuthService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

// ============ Handlers ============

/// Register a new user
#[utoipa::path(
    post,
    path = "/register/",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Username already exists or validation error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    validate_required(&payload.username, "Username", 50)?;
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let password_hash = AuthService::hash_password(&payload.password)?;

    let create_user = CreateUser {
        username: payload.username,
        password: payload.password,
    };

    let user = UserRepository::create(&state.db, &create_user, &password_hash)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::Conflict(_)) {
                tracing::warn!("Failed register attempt for {}", create_user.username);
            }
        })?;

    tracing::info!("User {} registered successfully", user.username);

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    }))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = match UserRepository::find_by_username(&state.db, &payload.username).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::warn!("Failed login for {}", payload.username);
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    let is_valid = AuthService::verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        tracing::warn!("Failed login for {}", payload.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = AuthService::generate_token(user.id, &user.username, &state.config)?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
