//! Unified error codes for the Muster service
//!
//! Error codes are organized by domain:
//! - 0xxx: General errors
//! - 1xxx: User errors
//! - 2xxx: Event errors
//! - 3xxx: Registration errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility; [`ErrorCode::as_str`] yields the stable
/// wire name used in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 3,

    // ==================== 1xxx: User ====================
    /// User not found
    UserNotFound = 1001,
    /// A user with this id already exists
    DuplicateUser = 1002,

    // ==================== 2xxx: Event ====================
    /// Event not found
    EventNotFound = 2001,
    /// Event is at capacity and the waitlist is disabled
    EventFull = 2002,

    // ==================== 3xxx: Registration ====================
    /// Registration not found
    RegistrationNotFound = 3001,
    /// User already holds a confirmed registration for this event
    AlreadyRegistered = 3002,
    /// User is already on this event's waitlist
    AlreadyOnWaitlist = 3003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Optimistic-concurrency retry budget exhausted
    Contention = 9003,
    /// Transient store failures exceeded the retry budget
    ServiceUnavailable = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Stable wire name for this code, as carried in the error envelope
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "UNKNOWN",
            ErrorCode::ValidationFailed => "VALIDATION_ERROR",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::DuplicateUser => "DUPLICATE_USER",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::EventFull => "EVENT_FULL",
            ErrorCode::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::AlreadyOnWaitlist => "ALREADY_ON_WAITLIST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Contention => "CONTENTION",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get the developer-facing default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::DuplicateUser => "User with this userId already exists",
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventFull => "Event is full and waitlist is not enabled",
            ErrorCode::RegistrationNotFound => "Registration not found",
            ErrorCode::AlreadyRegistered => "User already registered for this event",
            ErrorCode::AlreadyOnWaitlist => "User already on waitlist for this event",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::Contention => "Concurrent modification, please retry",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::InvalidRequest),

            1001 => Ok(ErrorCode::UserNotFound),
            1002 => Ok(ErrorCode::DuplicateUser),

            2001 => Ok(ErrorCode::EventNotFound),
            2002 => Ok(ErrorCode::EventFull),

            3001 => Ok(ErrorCode::RegistrationNotFound),
            3002 => Ok(ErrorCode::AlreadyRegistered),
            3003 => Ok(ErrorCode::AlreadyOnWaitlist),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::Contention),
            9004 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
