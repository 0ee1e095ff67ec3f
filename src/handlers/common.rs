use axum::extract::{FromRequest, FromRequestParts};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// JSON body extractor whose rejections surface as `AppError::Validation`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor with JSON error bodies
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameter extractor with JSON error bodies
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reject blank or overlong required text fields
pub fn validate_required(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Same as [`validate_required`] but only when a value was supplied
pub fn validate_optional(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => validate_required(v, field, max_len),
        None => Ok(()),
    }
}

/// Length limit for free-text fields that may be empty
pub fn validate_max_len(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        ))),
        _ => Ok(()),
    }
}
