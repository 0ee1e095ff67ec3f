use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Everything a handler can fail with
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate username or membership
    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Server-side detail is never included.
    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            AppError::InvalidCredentials => ("Invalid credentials", None),
            AppError::InvalidToken => ("Invalid token", None),
            AppError::TokenExpired => ("Token expired", None),
            AppError::Unauthorized => ("Unauthorized", None),
            AppError::NotFound(what) => ("Not found", Some(what.clone())),
            AppError::Conflict(msg) => ("Conflict", Some(msg.clone())),
            AppError::Validation(msg) => ("Validation error", Some(msg.clone())),
            AppError::Database(_) => ("Database error", None),
            AppError::Internal(_) => ("Internal server error", None),
        };

        ErrorBody { error, details }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(msg) => tracing::error!("Database error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        (self.status(), Json(self.body())).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                return AppError::Conflict("Record already exists".to_string());
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return AppError::Validation("Referenced record does not exist".to_string());
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(what) => AppError::NotFound(what),
            DbErr::RecordNotUpdated => AppError::NotFound("Record".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        if matches!(err.kind(), ErrorKind::ExpiredSignature) {
            AppError::TokenExpired
        } else {
            AppError::InvalidToken
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => AppError::Validation(e.body_text()),
            other => AppError::Internal(other.body_text()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
