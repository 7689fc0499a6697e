//! Application error type and its HTTP representation.
//!
//! Only run-level failures are errors. Per-query provider failures are
//! recovered inside the run and reported on the affected row instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::input::BatchTableError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors that abort a whole analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request body or batch table.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Auto-fetch selected without a provider credential.
    #[error("{message}")]
    MissingCredential { message: String, details: Value },

    /// No queries were supplied.
    #[error("{message}")]
    EmptyInput { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn missing_credential(message: impl Into<String>, details: Value) -> Self {
        Self::MissingCredential {
            message: message.into(),
            details,
        }
    }

    pub fn empty_input(message: impl Into<String>, details: Value) -> Self {
        Self::EmptyInput {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable error code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::MissingCredential { .. } => "missing_credential",
            AppError::EmptyInput { .. } => "empty_input",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::MissingCredential { .. }
            | AppError::EmptyInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its response payload without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::MissingCredential { message, details }
            | AppError::EmptyInput { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, .. } = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<BatchTableError> for AppError {
    fn from(err: BatchTableError) -> Self {
        AppError::bad_request(
            format!("Invalid batch table: {err}"),
            json!({ "source": "batchCsv" }),
        )
    }
}
