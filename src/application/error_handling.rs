// src/application/error_handling.rs
//
// Enhanced Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant or review rule violation (422)
    DomainError,

    /// Store write rejected (409)
    Store,

    /// External service error (502)
    ExternalService,

    /// Empty export result: a user error, not a system error
    EmptyDataset,

    /// Export was cancelled by the user
    Cancelled,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Resource not found".to_string(),
                details: None,
            },

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: domain_error.to_string(),
                details: None,
            },

            AppError::Store(reason) => Self {
                success: false,
                error_type: ErrorType::Store,
                message: "The store rejected the save; your edits are kept locally".to_string(),
                details: Some(reason),
            },

            AppError::Http(err) => Self {
                success: false,
                error_type: ErrorType::ExternalService,
                message: "A network request failed".to_string(),
                details: Some(err.to_string()),
            },

            AppError::EmptyDataset => Self {
                success: false,
                error_type: ErrorType::EmptyDataset,
                message: "No records matched the export criteria".to_string(),
                details: None,
            },

            AppError::Cancelled => Self {
                success: false,
                error_type: ErrorType::Cancelled,
                message: "Export cancelled".to_string(),
                details: None,
            },

            other => Self {
                success: false,
                error_type: ErrorType::Internal,
                message: "An internal error occurred".to_string(),
                details: Some(other.to_string()),
            },
        }
    }

    /// Create validation response for malformed command input
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: message.into(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}
