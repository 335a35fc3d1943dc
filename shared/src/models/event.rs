//! Event Model
//!
//! The engine interprets only `capacity`, `registered_count`,
//! `waitlist_enabled` and `waitlist`; every other attribute is stored and
//! echoed unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::fmt;
use std::str::FromStr;

/// Event lifecycle status. Opaque to the registration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
    Active,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Active => "active",
        }
    }
}

/// Error when parsing an unknown event status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEventStatus(pub String);

impl fmt::Display for InvalidEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid event status: {}", self.0)
    }
}

impl std::error::Error for InvalidEventStatus {}

impl FromStr for EventStatus {
    type Err = InvalidEventStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "active" => Ok(Self::Active),
            other => Err(InvalidEventStatus(other.to_string())),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event entity
///
/// `registered_count` and `waitlist` are owned by the registration engine;
/// the waitlist is an ordered FIFO of user ids kept inside the event record
/// so that it always moves atomically with the counter.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub organizer: String,
    pub status: EventStatus,
    pub capacity: i64,
    pub registered_count: i64,
    pub waitlist_enabled: bool,
    pub waitlist: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Build a freshly created event with initialised bookkeeping fields.
    pub fn from_create(
        event_id: String,
        payload: EventCreate,
        status: EventStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            title: payload.title,
            description: payload.description,
            date: payload.date,
            location: payload.location,
            organizer: payload.organizer,
            status,
            capacity: payload.capacity,
            registered_count: 0,
            waitlist_enabled: payload.waitlist_enabled,
            waitlist: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn available_spots(&self) -> i64 {
        self.capacity - self.registered_count
    }

    pub fn waitlist_count(&self) -> usize {
        self.waitlist.len()
    }
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreate {
    /// Caller-supplied id; a UUID is generated when absent
    pub event_id: Option<String>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub capacity: i64,
    pub organizer: String,
    pub status: String,
    #[serde(default)]
    pub waitlist_enabled: bool,
}

/// Update event payload
///
/// Only the opaque attributes may be patched. The engine-owned fields are
/// present so attempts to touch them can be rejected instead of silently
/// dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub status: Option<String>,
    pub capacity: Option<i64>,
    pub waitlist_enabled: Option<bool>,
    pub registered_count: Option<i64>,
    pub waitlist: Option<Vec<String>>,
}

impl EventUpdate {
    /// True when the patch carries no opaque field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.organizer.is_none()
            && self.status.is_none()
    }

    /// True when the patch tries to modify an engine-owned field
    pub fn touches_engine_fields(&self) -> bool {
        self.capacity.is_some()
            || self.waitlist_enabled.is_some()
            || self.registered_count.is_some()
            || self.waitlist.is_some()
    }
}

/// Event response augmented with computed counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub available_spots: i64,
    pub waitlist_count: usize,
}

impl From<Event> for EventDetail {
    fn from(event: Event) -> Self {
        Self {
            available_spots: event.available_spots(),
            waitlist_count: event.waitlist_count(),
            event,
        }
    }
}
