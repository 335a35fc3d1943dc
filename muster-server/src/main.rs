use muster_server::core::{Config, Server, ServerState};
use muster_server::utils::logger::init_logger;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get work directory from env or use current directory
    let work_dir = std::env::var("WORK_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    if !work_dir.exists() {
        std::fs::create_dir_all(&work_dir).expect("Failed to create work directory");
    }
    // Change to work directory so relative paths (database, logs) resolve
    std::env::set_current_dir(&work_dir).expect("Failed to change to work directory");

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger(&log_level, log_dir.as_deref());

    let config = Config::from_env();
    tracing::info!(
        "Muster server starting (env: {}, db: {})",
        config.environment,
        config.database_path
    );

    let state = ServerState::initialize(&config).await;
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("HTTP server error: {}", e);
    }
}
