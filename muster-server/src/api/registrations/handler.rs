//! Registration API Handlers
//!
//! Thin wrappers over the registration engine; existence checks and all
//! capacity/waitlist decisions happen inside the engine.

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;

use crate::core::ServerState;
use shared::error::AppResult;
use shared::models::{EventRegistrationCreate, RegistrationCreate, RegistrationCreated, RegistrationList};

/// POST /users/{user_id}/registrations
pub async fn register(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RegistrationCreate>,
) -> AppResult<(StatusCode, Json<RegistrationCreated>)> {
    let created = state.engine.register(&user_id, &payload.event_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /events/{event_id}/registrations
pub async fn register_for_event(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
    Json(payload): Json<EventRegistrationCreate>,
) -> AppResult<(StatusCode, Json<RegistrationCreated>)> {
    let created = state.engine.register(&payload.user_id, &event_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /users/{user_id}/registrations/{event_id}
pub async fn unregister(
    State(state): State<ServerState>,
    Path((user_id, event_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.engine.unregister(&user_id, &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /events/{event_id}/registrations/{user_id}
pub async fn unregister_for_event(
    State(state): State<ServerState>,
    Path((event_id, user_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.engine.unregister(&user_id, &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{user_id}/registrations
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<RegistrationList>> {
    let list = state.engine.list_for_user(&user_id).await?;
    Ok(Json(list))
}

/// GET /events/{event_id}/registrations
pub async fn list_for_event(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<RegistrationList>> {
    let list = state.engine.list_for_event(&event_id).await?;
    Ok(Json(list))
}
