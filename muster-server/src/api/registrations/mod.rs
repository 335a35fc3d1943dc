//! Registration API module
//!
//! The event-centric routes are aliases of the user-centric routes; both
//! operate on the same underlying records through the engine.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/users/{user_id}/registrations",
            post(handler::register).get(handler::list_for_user),
        )
        .route(
            "/users/{user_id}/registrations/{event_id}",
            delete(handler::unregister),
        )
        .route(
            "/events/{event_id}/registrations",
            post(handler::register_for_event).get(handler::list_for_event),
        )
        .route(
            "/events/{event_id}/registrations/{user_id}",
            delete(handler::unregister_for_event),
        )
}
