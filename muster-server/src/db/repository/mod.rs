//! Repository Module
//!
//! Typed persistence operations over the three tables. Conditional writes
//! are plain `INSERT`/`UPDATE ... WHERE <condition>` statements whose row
//! count decides success; multi-record operations run inside a single SQL
//! transaction and either fully commit or leave every row untouched.
//!
//! Transient failures (SQLITE_BUSY, pool timeouts, I/O) are retried here
//! with capped exponential backoff; everything else surfaces to the caller.

pub mod event;
pub mod registration;
pub mod user;

use shared::error::AppError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub(crate) const EVENT_COLUMNS: &str =
    "event_id, title, description, date, location, organizer, status, \
     capacity, registered_count, waitlist_enabled, waitlist, created_at, updated_at";

/// Maximum attempts for a store call hitting transient failures
const TRANSIENT_ATTEMPTS: u32 = 3;
/// First backoff step; doubles per attempt up to [`BACKOFF_CAP`]
const BACKOFF_BASE: Duration = Duration::from_millis(50);
const BACKOFF_CAP: Duration = Duration::from_millis(400);
/// Deadline for a single store call, retries included per attempt
const STORE_CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Condition failed: {0}")]
    ConditionFailed(String),

    #[error("Transient store failure: {0}")]
    Transient(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    RepoError::Duplicate(db.message().to_string())
                } else if db.message().contains("locked") || db.message().contains("busy") {
                    RepoError::Transient(db.message().to_string())
                } else {
                    RepoError::Database(err.to_string())
                }
            }
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => RepoError::Transient(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Fallback mapping into the external error taxonomy. Callers translate the
/// context-specific kinds (`NotFound`, `Duplicate`) before reaching for this.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Transient(msg) => AppError::service_unavailable(msg),
            RepoError::ConditionFailed(_) => AppError::contention(),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::NotFound(msg) | RepoError::Duplicate(msg) => AppError::internal(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

fn backoff_delay(attempt: u32) -> Duration {
    (BACKOFF_BASE * 2u32.pow(attempt)).min(BACKOFF_CAP)
}

/// Run a store call, retrying transient failures with capped exponential
/// backoff. Each attempt carries its own deadline.
pub(crate) async fn with_retries<T, F, Fut>(mut op: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepoResult<T>>,
{
    let mut attempt = 0;
    loop {
        let result = match tokio::time::timeout(STORE_CALL_TIMEOUT, op()).await {
            Ok(result) => result,
            Err(_) => Err(RepoError::Transient("store call deadline exceeded".into())),
        };

        match result {
            Err(RepoError::Transient(msg)) if attempt + 1 < TRANSIENT_ATTEMPTS => {
                tracing::warn!(attempt, error = %msg, "transient store failure, retrying");
                tokio::time::sleep(backoff_delay(attempt)).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
