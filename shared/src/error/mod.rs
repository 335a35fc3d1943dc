//! Unified error system for the Muster service
//!
//! This module provides the error handling surface shared by the server and
//! its clients:
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: rich error type with codes, messages, and field details
//! - [`ErrorEnvelope`]: the JSON error body returned by the HTTP API
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: User errors
//! - 2xxx: Event errors
//! - 3xxx: Registration errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::EventFull);
//!
//! // Create an error with a custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "name too long");
//!
//! // Validation error with field details
//! let err = AppError::validation("invalid payload")
//!     .with_field("userId", "must not be empty");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody, ErrorEnvelope, FieldError};
