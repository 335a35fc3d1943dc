//! Input validation helpers
//!
//! Centralized text length limits and per-field checks for the HTTP
//! payloads. Validation happens before any store call; failures carry a
//! field/message pair per violation.

use shared::error::{AppError, FieldError};
use shared::models::{EventCreate, EventStatus, EventUpdate, UserCreate};

// ── Text length limits ──────────────────────────────────────────────

/// User ids: letters, digits, `-`, `_`
pub const MAX_USER_ID_LEN: usize = 100;

/// Caller-supplied event ids
pub const MAX_EVENT_ID_LEN: usize = 100;

/// User display names
pub const MAX_NAME_LEN: usize = 200;

/// Event titles
pub const MAX_TITLE_LEN: usize = 200;

/// Event descriptions
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Event locations
pub const MAX_LOCATION_LEN: usize = 200;

/// Organizer names
pub const MAX_ORGANIZER_LEN: usize = 100;

// ── Violation collection ────────────────────────────────────────────

/// Collects per-field validation failures for one payload.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_details(self.0))
        }
    }
}

// ── Field checks ────────────────────────────────────────────────────

fn check_required_text(violations: &mut Violations, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        violations.push(field, format!("{field} must not be empty"));
    } else if value.len() > max_len {
        violations.push(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        );
    }
}

fn check_optional_text(
    violations: &mut Violations,
    field: &str,
    value: Option<&String>,
    max_len: usize,
) {
    if let Some(v) = value {
        if v.len() > max_len {
            violations.push(
                field,
                format!("{field} is too long ({} chars, max {max_len})", v.len()),
            );
        }
    }
}

pub fn check_user_id(violations: &mut Violations, value: &str) {
    if value.trim().is_empty() {
        violations.push("userId", "userId must not be empty or whitespace only");
    } else if value.len() > MAX_USER_ID_LEN
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        violations.push(
            "userId",
            format!("userId must match [A-Za-z0-9_-]{{1,{MAX_USER_ID_LEN}}}"),
        );
    }
}

pub fn check_event_id(violations: &mut Violations, value: &str) {
    if value.trim().is_empty() {
        violations.push("eventId", "eventId must not be empty or whitespace only");
    } else if value.len() > MAX_EVENT_ID_LEN {
        violations.push(
            "eventId",
            format!(
                "eventId is too long ({} chars, max {MAX_EVENT_ID_LEN})",
                value.len()
            ),
        );
    }
}

fn check_status(violations: &mut Violations, value: &str) {
    if value.parse::<EventStatus>().is_err() {
        violations.push(
            "status",
            "status must be one of draft, published, cancelled, completed, active",
        );
    }
}

// ── Payload validators ──────────────────────────────────────────────

/// Validate a user-creation payload and return the canonical form
/// (name trimmed; the user id is never rewritten).
pub fn validate_user_create(payload: &UserCreate) -> Result<UserCreate, AppError> {
    let mut violations = Violations::default();
    check_user_id(&mut violations, &payload.user_id);
    check_required_text(&mut violations, "name", &payload.name, MAX_NAME_LEN);
    violations.into_result()?;

    Ok(UserCreate {
        user_id: payload.user_id.clone(),
        name: payload.name.trim().to_string(),
    })
}

/// Validate an event-creation payload and return the canonical form
/// (title/location/organizer trimmed).
pub fn validate_event_create(payload: &EventCreate) -> Result<EventCreate, AppError> {
    let mut violations = Violations::default();

    if let Some(event_id) = &payload.event_id {
        check_event_id(&mut violations, event_id);
    }
    check_required_text(&mut violations, "title", &payload.title, MAX_TITLE_LEN);
    if payload.description.len() > MAX_DESCRIPTION_LEN {
        violations.push(
            "description",
            format!(
                "description is too long ({} chars, max {MAX_DESCRIPTION_LEN})",
                payload.description.len()
            ),
        );
    }
    if payload.date.trim().is_empty() {
        violations.push("date", "date must not be empty");
    }
    check_required_text(
        &mut violations,
        "location",
        &payload.location,
        MAX_LOCATION_LEN,
    );
    check_required_text(
        &mut violations,
        "organizer",
        &payload.organizer,
        MAX_ORGANIZER_LEN,
    );
    check_status(&mut violations, &payload.status);
    if payload.capacity < 1 {
        violations.push("capacity", "capacity must be at least 1");
    }
    violations.into_result()?;

    Ok(EventCreate {
        event_id: payload.event_id.clone(),
        title: payload.title.trim().to_string(),
        description: payload.description.clone(),
        date: payload.date.clone(),
        location: payload.location.trim().to_string(),
        capacity: payload.capacity,
        organizer: payload.organizer.trim().to_string(),
        status: payload.status.clone(),
        waitlist_enabled: payload.waitlist_enabled,
    })
}

/// Validate an event patch. Engine-owned fields are rejected outright.
pub fn validate_event_update(patch: &EventUpdate) -> Result<(), AppError> {
    let mut violations = Violations::default();

    if patch.capacity.is_some() {
        violations.push("capacity", "capacity is immutable after creation");
    }
    if patch.waitlist_enabled.is_some() {
        violations.push("waitlistEnabled", "waitlistEnabled is immutable");
    }
    if patch.registered_count.is_some() {
        violations.push("registeredCount", "registeredCount is engine-managed");
    }
    if patch.waitlist.is_some() {
        violations.push("waitlist", "waitlist is engine-managed");
    }

    check_optional_text(&mut violations, "title", patch.title.as_ref(), MAX_TITLE_LEN);
    check_optional_text(
        &mut violations,
        "description",
        patch.description.as_ref(),
        MAX_DESCRIPTION_LEN,
    );
    check_optional_text(
        &mut violations,
        "location",
        patch.location.as_ref(),
        MAX_LOCATION_LEN,
    );
    check_optional_text(
        &mut violations,
        "organizer",
        patch.organizer.as_ref(),
        MAX_ORGANIZER_LEN,
    );
    if let Some(status) = &patch.status {
        check_status(&mut violations, status);
    }

    violations.into_result()
}
