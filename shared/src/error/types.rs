//! Error types and the wire-level error envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending request field
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

/// Application error with structured error code and field details
///
/// This is the primary error type for the service:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional per-field details for validation failures
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level details (validation failures)
    pub details: Option<Vec<FieldError>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Append a field-level detail to this error
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.details.get_or_insert_with(Vec::new).push(FieldError {
            field: field.into(),
            message: message.into(),
        });
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error from collected field failures
    pub fn validation_details(details: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: ErrorCode::ValidationFailed.message().to_string(),
            details: Some(details),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a user not found error
    pub fn user_not_found(user_id: &str) -> Self {
        Self::with_message(ErrorCode::UserNotFound, format!("User {user_id} not found"))
    }

    /// Create a duplicate user error
    pub fn duplicate_user(user_id: &str) -> Self {
        Self::with_message(
            ErrorCode::DuplicateUser,
            format!("User {user_id} already exists"),
        )
    }

    /// Create an event not found error
    pub fn event_not_found(event_id: &str) -> Self {
        Self::with_message(
            ErrorCode::EventNotFound,
            format!("Event {event_id} not found"),
        )
    }

    /// Create an event full error
    pub fn event_full() -> Self {
        Self::new(ErrorCode::EventFull)
    }

    /// Create a registration not found error
    pub fn registration_not_found() -> Self {
        Self::new(ErrorCode::RegistrationNotFound)
    }

    /// Create an already registered error
    pub fn already_registered() -> Self {
        Self::new(ErrorCode::AlreadyRegistered)
    }

    /// Create an already on waitlist error
    pub fn already_on_waitlist() -> Self {
        Self::new(ErrorCode::AlreadyOnWaitlist)
    }

    /// Create a contention error (optimistic retry budget exhausted)
    pub fn contention() -> Self {
        Self::new(ErrorCode::Contention)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a service unavailable error
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ServiceUnavailable, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Error body carried inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable wire name of the error code (e.g. `EVENT_FULL`)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Field-level details (validation failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
    /// Request path that produced the error
    pub path: String,
    /// Request id for correlation
    pub request_id: String,
}

/// Unified JSON error response: `{ "error": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Build the envelope for an error, stamped with request context
    pub fn new(error: &AppError, path: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: error.code.as_str().to_string(),
                message: error.message.clone(),
                details: error.details.clone(),
                timestamp: Utc::now(),
                path: path.into(),
                request_id: request_id.into(),
            },
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        // Log system errors; business errors surface to the client only
        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "system error occurred"
            );
        }

        let status = self.http_status();
        let envelope = ErrorEnvelope::new(&self, "", "");
        let mut response = (status, Json(envelope)).into_response();
        // The response middleware re-renders the envelope with the request
        // path and id; keep the error available for it.
        response.extensions_mut().insert(self);
        response
    }
}
