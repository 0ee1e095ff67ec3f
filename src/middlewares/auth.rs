use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::{AuthService, Claims};
use crate::state::AppState;

/// Caller identity carried by a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

impl AuthUser {
    /// Verify a raw token and build the caller identity from it
    pub fn from_token(token: &str, config: &Config) -> AppResult<Self> {
        let claims = AuthService::verify_token(token, config).inspect_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
        })?;
        Ok(claims.into())
    }
}

/// Extractor for AuthUser - can be used directly in handlers
/// Example: `async fn handler(user: AuthUser) -> ... { }`
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// `Authorization: Bearer <token>` value, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Auth middleware - every route behind it needs a valid, unexpired token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let auth_user = AuthUser::from_token(token, &state.config)?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
