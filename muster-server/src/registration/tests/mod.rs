//! Engine behaviour tests against an in-memory store.

mod test_unregister;

use crate::db::DbService;
use crate::db::repository;
use crate::registration::RegistrationEngine;
use shared::models::{Event, EventCreate, EventStatus, Registration, User};
use shared::util;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    DbService::in_memory()
        .await
        .expect("in-memory database")
        .pool
}

async fn test_engine() -> (RegistrationEngine, SqlitePool) {
    let pool = test_pool().await;
    (RegistrationEngine::new(pool.clone()), pool)
}

async fn seed_user(pool: &SqlitePool, user_id: &str) {
    let now = util::now();
    let user = User {
        user_id: user_id.into(),
        name: format!("User {user_id}"),
        created_at: now,
        updated_at: now,
    };
    repository::user::create(pool, &user).await.unwrap();
}

async fn seed_event(pool: &SqlitePool, event_id: &str, capacity: i64, waitlist_enabled: bool) {
    let payload = EventCreate {
        event_id: Some(event_id.into()),
        title: format!("Event {event_id}"),
        description: "seeded".into(),
        date: "2026-09-01T18:00:00Z".into(),
        location: "Main Hall".into(),
        capacity,
        organizer: "tests".into(),
        status: "published".into(),
        waitlist_enabled,
    };
    let event = Event::from_create(
        event_id.into(),
        payload,
        EventStatus::Published,
        util::now(),
    );
    repository::event::create(pool, &event).await.unwrap();
}

async fn fetch_event(pool: &SqlitePool, event_id: &str) -> Event {
    repository::event::find_by_id(pool, event_id)
        .await
        .unwrap()
        .expect("event exists")
}

async fn fetch_registration(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
) -> Option<Registration> {
    repository::registration::find(pool, user_id, event_id)
        .await
        .unwrap()
}
