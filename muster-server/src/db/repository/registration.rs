//! Registration Repository
//!
//! Single-row lookups plus the multi-record transactions the engine
//! commits. Every `tx_*` function either fully commits or leaves all rows
//! untouched: conditions are `WHERE` clauses, a zero row count aborts the
//! transaction with [`RepoError::ConditionFailed`], and dropping the
//! transaction rolls it back.
//!
//! Waitlist mutations use SQLite's JSON functions so each append, removal
//! and head-pop is one atomic statement carrying its own conditions
//! (`user ∉ waitlist`, `waitlist[0] = user`); concurrent writers never
//! clobber each other's entries.

use super::{EVENT_COLUMNS, RepoError, RepoResult, with_retries};
use chrono::{DateTime, Utc};
use shared::models::{Event, Registration, RegistrationStatus};
use sqlx::SqlitePool;

const REGISTRATION_COLUMNS: &str =
    "user_id, event_id, status, registered_at, event_title, event_date";

pub async fn find(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
) -> RepoResult<Option<Registration>> {
    with_retries(|| async move {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE user_id = ? AND event_id = ?"
        ))
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(pool)
        .await?;
        Ok(registration)
    })
    .await
}

pub async fn find_by_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<Registration>> {
    with_retries(|| async move {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(registrations)
    })
    .await
}

pub async fn find_by_event(pool: &SqlitePool, event_id: &str) -> RepoResult<Vec<Registration>> {
    with_retries(|| async move {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = ?"
        ))
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(registrations)
    })
    .await
}

/// Atomically insert a confirmed registration and take one capacity slot.
///
/// Conditions: the `(user_id, event_id)` pair is absent and
/// `registered_count < capacity`. Returns the event as of the commit.
pub async fn tx_register_confirmed(
    pool: &SqlitePool,
    registration: &Registration,
) -> RepoResult<Event> {
    with_retries(|| tx_register_confirmed_once(pool, registration)).await
}

async fn tx_register_confirmed_once(
    pool: &SqlitePool,
    registration: &Registration,
) -> RepoResult<Event> {
    let mut tx = pool.begin().await?;

    insert_registration(&mut tx, registration).await?;

    let updated = sqlx::query(
        "UPDATE events SET registered_count = registered_count + 1, updated_at = ? \
         WHERE event_id = ? AND registered_count < capacity",
    )
    .bind(registration.registered_at)
    .bind(&registration.event_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "event {} is at capacity",
            registration.event_id
        )));
    }

    let event = fetch_event(&mut tx, &registration.event_id).await?;
    tx.commit().await?;
    Ok(event)
}

/// Atomically insert a waitlist registration and append the user to the
/// tail of the event's waitlist.
///
/// Conditions: the pair is absent, the event is still full with its
/// waitlist enabled, and the user is not already queued.
pub async fn tx_register_waitlist(
    pool: &SqlitePool,
    registration: &Registration,
) -> RepoResult<Event> {
    with_retries(|| tx_register_waitlist_once(pool, registration)).await
}

async fn tx_register_waitlist_once(
    pool: &SqlitePool,
    registration: &Registration,
) -> RepoResult<Event> {
    let mut tx = pool.begin().await?;

    insert_registration(&mut tx, registration).await?;

    let updated = sqlx::query(
        "UPDATE events SET waitlist = json_insert(waitlist, '$[#]', ?), updated_at = ? \
         WHERE event_id = ? AND registered_count = capacity AND waitlist_enabled = 1 \
         AND NOT EXISTS (SELECT 1 FROM json_each(events.waitlist) WHERE value = ?)",
    )
    .bind(&registration.user_id)
    .bind(registration.registered_at)
    .bind(&registration.event_id)
    .bind(&registration.user_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "event {} is no longer full, or user {} is already queued",
            registration.event_id, registration.user_id
        )));
    }

    let event = fetch_event(&mut tx, &registration.event_id).await?;
    tx.commit().await?;
    Ok(event)
}

/// Atomically delete a confirmed registration and free its capacity slot.
pub async fn tx_unregister_confirmed(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    with_retries(|| tx_unregister_confirmed_once(pool, user_id, event_id, now)).await
}

async fn tx_unregister_confirmed_once(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    delete_registration(&mut tx, user_id, event_id, RegistrationStatus::Confirmed).await?;

    let updated = sqlx::query(
        "UPDATE events SET registered_count = registered_count - 1, updated_at = ? \
         WHERE event_id = ? AND registered_count > 0",
    )
    .bind(now)
    .bind(event_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "event {event_id} has no confirmed registrations to release"
        )));
    }

    tx.commit().await?;
    Ok(())
}

/// Atomically delete a waitlist registration and remove the user from the
/// event's waitlist, preserving the order of the remaining entries.
pub async fn tx_unregister_waitlist(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    with_retries(|| tx_unregister_waitlist_once(pool, user_id, event_id, now)).await
}

async fn tx_unregister_waitlist_once(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    delete_registration(&mut tx, user_id, event_id, RegistrationStatus::Waitlist).await?;

    // json_each scans in array order and json_group_array keeps that order,
    // so the remaining entries stay FIFO.
    let updated = sqlx::query(
        "UPDATE events SET waitlist = COALESCE((SELECT json_group_array(value) \
           FROM json_each(events.waitlist) WHERE value <> ?), '[]'), updated_at = ? \
         WHERE event_id = ? \
         AND EXISTS (SELECT 1 FROM json_each(events.waitlist) WHERE value = ?)",
    )
    .bind(user_id)
    .bind(now)
    .bind(event_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "user {user_id} is not on the waitlist of event {event_id}"
        )));
    }

    tx.commit().await?;
    Ok(())
}

/// Atomically promote the waitlist head into a freed confirmed slot.
///
/// Conditions: `head` is still the first waitlist entry, its registration
/// still has waitlist status, and a capacity slot is free. The counter
/// moves back up here, so every committed state keeps
/// `registered_count = |confirmed registrations|`.
pub async fn tx_promote_head(
    pool: &SqlitePool,
    event_id: &str,
    head: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    with_retries(|| tx_promote_head_once(pool, event_id, head, now)).await
}

async fn tx_promote_head_once(
    pool: &SqlitePool,
    event_id: &str,
    head: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let flipped = sqlx::query(
        "UPDATE registrations SET status = ? \
         WHERE user_id = ? AND event_id = ? AND status = ?",
    )
    .bind(RegistrationStatus::Confirmed)
    .bind(head)
    .bind(event_id)
    .bind(RegistrationStatus::Waitlist)
    .execute(&mut *tx)
    .await?;
    if flipped.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "registration for waitlisted user {head} on event {event_id} is gone"
        )));
    }

    let updated = sqlx::query(
        "UPDATE events SET waitlist = json_remove(waitlist, '$[0]'), \
         registered_count = registered_count + 1, updated_at = ? \
         WHERE event_id = ? AND json_extract(waitlist, '$[0]') = ? \
         AND registered_count < capacity",
    )
    .bind(now)
    .bind(event_id)
    .bind(head)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "user {head} is no longer the waitlist head of event {event_id}"
        )));
    }

    tx.commit().await?;
    Ok(())
}

// ── Shared statement helpers ────────────────────────────────────────

async fn insert_registration(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    registration: &Registration,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO registrations (user_id, event_id, status, registered_at, event_title, event_date) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&registration.user_id)
    .bind(&registration.event_id)
    .bind(registration.status)
    .bind(registration.registered_at)
    .bind(&registration.event_title)
    .bind(&registration.event_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn delete_registration(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    event_id: &str,
    status: RegistrationStatus,
) -> RepoResult<()> {
    let deleted =
        sqlx::query("DELETE FROM registrations WHERE user_id = ? AND event_id = ? AND status = ?")
            .bind(user_id)
            .bind(event_id)
            .bind(status)
            .execute(&mut **tx)
            .await?;
    if deleted.rows_affected() == 0 {
        return Err(RepoError::ConditionFailed(format!(
            "registration ({user_id}, {event_id}) is absent or changed status"
        )));
    }
    Ok(())
}

async fn fetch_event(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    event_id: &str,
) -> RepoResult<Event> {
    let event = sqlx::query_as::<_, Event>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?"
    ))
    .bind(event_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(event)
}
