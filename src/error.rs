//! Error types and HTTP response conversion.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::pagination::PaginationError;

/// A single field validation failure reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation failures collected across filters and parameters.
///
/// Validation never fails fast: every failing field is recorded so the
/// client gets the complete list in one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a single field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Absorb all failures from another collection, preserving order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when no failures were recorded, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// JSON error body: `{ status, message, errors[] }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            // A missing or unparseable base URL means the handler failed to
            // supply one, not that the client sent bad input.
            ApiError::Pagination(PaginationError::MissingBaseUrl)
            | ApiError::Pagination(PaginationError::InvalidBaseUrl) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Pagination(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(errors) => ErrorBody {
                status: status.as_u16(),
                message: "Validation failed".to_string(),
                errors: errors.errors().to_vec(),
            },
            ApiError::Pagination(err) if status == StatusCode::BAD_REQUEST => ErrorBody {
                status: status.as_u16(),
                message: err.to_string(),
                errors: Vec::new(),
            },
            ApiError::NotFound => ErrorBody {
                status: status.as_u16(),
                message: self.to_string(),
                errors: Vec::new(),
            },
            _ => {
                tracing::error!(error = %self, "request failed");
                ErrorBody {
                    status: status.as_u16(),
                    message: "Internal server error".to_string(),
                    errors: Vec::new(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
