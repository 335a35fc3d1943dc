//! User API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users", post(handler::create))
        .route("/users/{user_id}", get(handler::get_by_id))
}
