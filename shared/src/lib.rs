//! Shared types for the Muster event-registration service
//!
//! This crate carries everything both the server and API consumers agree on:
//!
//! - [`models`]: wire-level entities (users, events, registrations) and
//!   their create/update payloads
//! - [`error`]: the unified error system (codes, categories, HTTP mapping,
//!   error envelope)
//! - [`util`]: small time helpers

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorEnvelope, FieldError};
