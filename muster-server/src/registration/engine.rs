//! Engine implementation: read a fresh snapshot, decide, conditionally
//! commit, and on a lost race re-read and re-decide.

use sqlx::SqlitePool;
use std::time::Duration;
use tokio::time::timeout;

use crate::db::repository::{self, RepoError};
use shared::error::{AppError, AppResult};
use shared::models::{
    Event, Registration, RegistrationCreated, RegistrationList, RegistrationStatus,
};
use shared::util;

/// Optimistic-retry budget for conditional commits. Exhausting it surfaces
/// as `CONTENTION`.
const MAX_COMMIT_ATTEMPTS: u32 = 5;
/// End-to-end deadline for a single engine operation, retries included.
const OP_DEADLINE: Duration = Duration::from_secs(5);

/// Logical state of a `(user, event)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairState {
    None,
    Confirmed,
    Waitlisted,
}

impl PairState {
    fn of(existing: Option<&Registration>) -> Self {
        match existing.map(|r| r.status) {
            None => Self::None,
            Some(RegistrationStatus::Confirmed) => Self::Confirmed,
            Some(RegistrationStatus::Waitlist) => Self::Waitlisted,
        }
    }
}

/// Planned transaction for a register attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Confirm,
    Waitlist,
}

/// Pure decision: given the pair state and an event snapshot, pick the
/// transaction to attempt or the error to surface.
fn plan_register(state: PairState, event: &Event) -> Result<Plan, AppError> {
    match state {
        PairState::Confirmed => Err(AppError::already_registered()),
        PairState::Waitlisted => Err(AppError::already_on_waitlist()),
        PairState::None => {
            if event.registered_count < event.capacity {
                Ok(Plan::Confirm)
            } else if event.waitlist_enabled {
                Ok(Plan::Waitlist)
            } else {
                Err(AppError::event_full())
            }
        }
    }
}

/// The registration engine.
///
/// Stateless beyond the pool; correctness under concurrency relies entirely
/// on the conditional transactions in the repository layer.
#[derive(Clone)]
pub struct RegistrationEngine {
    pool: SqlitePool,
}

impl RegistrationEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user for an event, either confirmed or waitlisted.
    pub async fn register(&self, user_id: &str, event_id: &str) -> AppResult<RegistrationCreated> {
        match timeout(OP_DEADLINE, self.register_inner(user_id, event_id)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::service_unavailable(
                "registration deadline exceeded",
            )),
        }
    }

    async fn register_inner(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> AppResult<RegistrationCreated> {
        if repository::user::find_by_id(&self.pool, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::user_not_found(user_id));
        }

        for _attempt in 0..MAX_COMMIT_ATTEMPTS {
            let event = repository::event::find_by_id(&self.pool, event_id)
                .await?
                .ok_or_else(|| AppError::event_not_found(event_id))?;
            let existing = repository::registration::find(&self.pool, user_id, event_id).await?;

            let plan = plan_register(PairState::of(existing.as_ref()), &event)?;

            // eventTitle/eventDate snapshot the event at decision time
            let registration = Registration {
                user_id: user_id.to_owned(),
                event_id: event_id.to_owned(),
                status: match plan {
                    Plan::Confirm => RegistrationStatus::Confirmed,
                    Plan::Waitlist => RegistrationStatus::Waitlist,
                },
                registered_at: util::now(),
                event_title: event.title.clone(),
                event_date: event.date.clone(),
            };

            let committed = match plan {
                Plan::Confirm => {
                    repository::registration::tx_register_confirmed(&self.pool, &registration)
                        .await
                }
                Plan::Waitlist => {
                    if event.waitlist.contains(&registration.user_id) {
                        return Err(AppError::already_on_waitlist());
                    }
                    repository::registration::tx_register_waitlist(&self.pool, &registration).await
                }
            };

            match committed {
                Ok(event) => {
                    return Ok(RegistrationCreated {
                        available_spots: event.available_spots(),
                        waitlist_count: event.waitlist_count(),
                        registration,
                    });
                }
                // Another writer got there first (capacity filled, waitlist
                // shifted, or the pair appeared): fresh snapshot, re-decide.
                Err(RepoError::ConditionFailed(_)) | Err(RepoError::Duplicate(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::contention())
    }

    /// Remove a user's registration; a confirmed departure promotes the
    /// waitlist head when there is one.
    pub async fn unregister(&self, user_id: &str, event_id: &str) -> AppResult<()> {
        match timeout(OP_DEADLINE, self.unregister_inner(user_id, event_id)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::service_unavailable(
                "unregistration deadline exceeded",
            )),
        }
    }

    async fn unregister_inner(&self, user_id: &str, event_id: &str) -> AppResult<()> {
        for _attempt in 0..MAX_COMMIT_ATTEMPTS {
            let registration = repository::registration::find(&self.pool, user_id, event_id)
                .await?
                .ok_or_else(AppError::registration_not_found)?;
            if repository::event::find_by_id(&self.pool, event_id)
                .await?
                .is_none()
            {
                return Err(AppError::event_not_found(event_id));
            }

            let now = util::now();
            let committed = match registration.status {
                RegistrationStatus::Confirmed => {
                    repository::registration::tx_unregister_confirmed(
                        &self.pool, user_id, event_id, now,
                    )
                    .await
                }
                RegistrationStatus::Waitlist => {
                    repository::registration::tx_unregister_waitlist(
                        &self.pool, user_id, event_id, now,
                    )
                    .await
                }
            };

            match committed {
                Ok(()) => {
                    if registration.status == RegistrationStatus::Confirmed {
                        self.promote_head(event_id).await;
                    }
                    return Ok(());
                }
                Err(RepoError::ConditionFailed(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::contention())
    }

    /// Promote the waitlist head into the freed confirmed slot.
    ///
    /// Best-effort: a head that unregistered in the same window is skipped
    /// via the transaction's own conditions, and a failure leaves the event
    /// in the legal "one spot free, waitlist non-empty" state that the next
    /// departure repairs.
    async fn promote_head(&self, event_id: &str) {
        for _attempt in 0..MAX_COMMIT_ATTEMPTS {
            let event = match repository::event::find_by_id(&self.pool, event_id).await {
                Ok(Some(event)) => event,
                Ok(None) => return,
                Err(err) => {
                    tracing::warn!(event_id, error = %err, "waitlist promotion aborted");
                    return;
                }
            };
            if event.registered_count >= event.capacity {
                return;
            }
            let Some(head) = event.waitlist.first().cloned() else {
                return;
            };

            match repository::registration::tx_promote_head(&self.pool, event_id, &head, util::now())
                .await
            {
                Ok(()) => {
                    tracing::info!(event_id, user_id = %head, "promoted from waitlist");
                    return;
                }
                // Head changed or dropped out under us: re-read and retry.
                Err(RepoError::ConditionFailed(_)) => continue,
                Err(err) => {
                    tracing::warn!(event_id, error = %err, "waitlist promotion failed");
                    return;
                }
            }
        }
        tracing::warn!(event_id, "waitlist promotion retry budget exhausted");
    }

    /// All registrations of a user, any status. The user must exist.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<RegistrationList> {
        if repository::user::find_by_id(&self.pool, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::user_not_found(user_id));
        }
        let registrations = repository::registration::find_by_user(&self.pool, user_id).await?;
        Ok(RegistrationList {
            total: registrations.len(),
            registrations,
        })
    }

    /// All registrations of an event, any status. The event must exist.
    pub async fn list_for_event(&self, event_id: &str) -> AppResult<RegistrationList> {
        if repository::event::find_by_id(&self.pool, event_id)
            .await?
            .is_none()
        {
            return Err(AppError::event_not_found(event_id));
        }
        let registrations = repository::registration::find_by_event(&self.pool, event_id).await?;
        Ok(RegistrationList {
            total: registrations.len(),
            registrations,
        })
    }
}
