//! Core server plumbing: configuration, shared state, HTTP server and
//! middleware.

pub mod config;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
