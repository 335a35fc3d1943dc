//! Registration Model
//!
//! A registration is keyed by `(user_id, event_id)`. `event_title` and
//! `event_date` are snapshots captured at registration time; they are not
//! refreshed when the event is updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Holds a capacity slot
    Confirmed,
    /// Queued for a slot, FIFO order
    Waitlist,
}

/// Registration entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_id: String,
    pub event_id: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub event_title: String,
    pub event_date: String,
}

/// Register payload for the user-centric route (`POST /users/{id}/registrations`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreate {
    pub event_id: String,
}

/// Register payload for the event-centric route (`POST /events/{id}/registrations`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationCreate {
    pub user_id: String,
}

/// Response for a successful registration: the created record plus the
/// event counters as of the commit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreated {
    #[serde(flatten)]
    pub registration: Registration,
    pub available_spots: i64,
    pub waitlist_count: usize,
}

/// Registration listing with a total count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationList {
    pub registrations: Vec<Registration>,
    pub total: usize,
}
