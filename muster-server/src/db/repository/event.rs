//! Event Repository
//!
//! CRUD over event rows. Only the opaque attributes are writable here; the
//! engine-owned columns (`registered_count`, `waitlist`) change exclusively
//! through the transactions in [`super::registration`].

use super::{EVENT_COLUMNS, RepoError, RepoResult, with_retries};
use chrono::{DateTime, Utc};
use shared::models::{Event, EventStatus, EventUpdate};
use sqlx::SqlitePool;

pub async fn create(pool: &SqlitePool, event: &Event) -> RepoResult<()> {
    with_retries(|| async move {
        sqlx::query(
            "INSERT INTO events (event_id, title, description, date, location, organizer, status, \
             capacity, registered_count, waitlist_enabled, waitlist, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&event.event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.date)
        .bind(&event.location)
        .bind(&event.organizer)
        .bind(event.status)
        .bind(event.capacity)
        .bind(event.registered_count)
        .bind(event.waitlist_enabled)
        .bind(&event.waitlist)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    })
    .await
}

pub async fn find_by_id(pool: &SqlitePool, event_id: &str) -> RepoResult<Option<Event>> {
    with_retries(|| async move {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?"
        ))
        .bind(event_id)
        .fetch_optional(pool)
        .await?;
        Ok(event)
    })
    .await
}

/// All events, optionally filtered by status. Ordering is unspecified by the
/// API contract; newest-first keeps listings stable for humans.
pub async fn find_all(pool: &SqlitePool, status: Option<EventStatus>) -> RepoResult<Vec<Event>> {
    with_retries(|| async move {
        let events = match status {
            Some(status) => {
                sqlx::query_as::<_, Event>(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events WHERE status = ? ORDER BY created_at DESC"
                ))
                .bind(status)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Event>(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC"
                ))
                .fetch_all(pool)
                .await?
            }
        };
        Ok(events)
    })
    .await
}

/// Patch the opaque attributes of an event. Engine-owned columns are not
/// reachable from here regardless of what the patch carries.
pub async fn update_opaque(
    pool: &SqlitePool,
    event_id: &str,
    patch: &EventUpdate,
    now: DateTime<Utc>,
) -> RepoResult<Event> {
    let updated = with_retries(|| async move {
        let result = sqlx::query(
            "UPDATE events SET \
             title = COALESCE(?, title), \
             description = COALESCE(?, description), \
             date = COALESCE(?, date), \
             location = COALESCE(?, location), \
             organizer = COALESCE(?, organizer), \
             status = COALESCE(?, status), \
             updated_at = ? \
             WHERE event_id = ?",
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.date)
        .bind(&patch.location)
        .bind(&patch.organizer)
        .bind(&patch.status)
        .bind(now)
        .bind(event_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    })
    .await?;

    if updated == 0 {
        return Err(RepoError::NotFound(format!("event {event_id}")));
    }

    find_by_id(pool, event_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("event {event_id}")))
}

pub async fn delete(pool: &SqlitePool, event_id: &str) -> RepoResult<bool> {
    with_retries(|| async move {
        let result = sqlx::query("DELETE FROM events WHERE event_id = ?")
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    })
    .await
}
