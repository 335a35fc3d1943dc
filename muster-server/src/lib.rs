//! Muster Server - event-registration core
//!
//! # Module structure
//!
//! ```text
//! muster-server/src/
//! ├── core/          # Configuration, state, HTTP server, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repository layer
//! ├── registration/  # Registration engine (core state machine)
//! └── utils/         # Validation, logging
//! ```
//!
//! The registration engine is the only writer of `registered_count` and
//! `waitlist`; every mutation it performs is a single conditional SQL
//! transaction, and contention is resolved by re-reading a fresh snapshot.

pub mod api;
pub mod core;
pub mod db;
pub mod registration;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use registration::RegistrationEngine;

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
