//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::UserNotFound | Self::EventNotFound | Self::RegistrationNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::DuplicateUser
            | Self::AlreadyRegistered
            | Self::AlreadyOnWaitlist
            | Self::EventFull => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient, client can retry)
            Self::Contention | Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
