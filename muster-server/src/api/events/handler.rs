//! Event API Handlers
//!
//! Event CRUD. Capacity bookkeeping fields are initialised here on create
//! and untouchable afterwards; the registration engine owns them.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use crate::utils::validation;
use shared::error::{AppError, AppResult};
use shared::models::{Event, EventCreate, EventDetail, EventStatus, EventUpdate};
use shared::util;

/// POST /events - create an event with initialised bookkeeping
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<(StatusCode, Json<EventDetail>)> {
    let payload = validation::validate_event_create(&payload)?;
    let status: EventStatus = payload
        .status
        .parse()
        .map_err(|_| AppError::validation("invalid event status"))?;

    let event_id = payload
        .event_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let event = Event::from_create(event_id, payload, status, util::now());

    repository::event::create(&state.pool, &event).await?;
    Ok((StatusCode::CREATED, Json(EventDetail::from(event))))
}

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// GET /events?status= - list events, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EventDetail>>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<EventStatus>()
                .map_err(|_| AppError::validation("unknown status filter"))?,
        ),
        None => None,
    };

    let events = repository::event::find_all(&state.pool, status).await?;
    Ok(Json(events.into_iter().map(EventDetail::from).collect()))
}

/// GET /events/{event_id} - event augmented with computed counters
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<EventDetail>> {
    let event = repository::event::find_by_id(&state.pool, &event_id)
        .await?
        .ok_or_else(|| AppError::event_not_found(&event_id))?;
    Ok(Json(EventDetail::from(event)))
}

/// PUT /events/{event_id} - patch opaque fields only
pub async fn update(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
    Json(patch): Json<EventUpdate>,
) -> AppResult<Json<EventDetail>> {
    validation::validate_event_update(&patch)?;
    if patch.is_empty() {
        return Err(AppError::invalid_request("no fields to update"));
    }

    match repository::event::update_opaque(&state.pool, &event_id, &patch, util::now()).await {
        Ok(event) => Ok(Json(EventDetail::from(event))),
        Err(RepoError::NotFound(_)) => Err(AppError::event_not_found(&event_id)),
        Err(err) => Err(err.into()),
    }
}

/// DELETE /events/{event_id}
///
/// Registrations referencing the event are not cascaded; orphan cleanup is
/// an operator policy.
pub async fn delete(
    State(state): State<ServerState>,
    Path(event_id): Path<String>,
) -> AppResult<StatusCode> {
    if repository::event::delete(&state.pool, &event_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::event_not_found(&event_id))
    }
}
