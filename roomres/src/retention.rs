//! Which reservations a user may purge from their history.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::reservation::{Reservation, ReservationStatus};
use crate::user::Actor;

/// Why a deletion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The actor is neither the owner nor an admin.
    NotPermitted,
    /// A pending request must be cancelled before it can be deleted.
    PendingMustCancel,
    /// An approved booking stays until its end time has passed.
    BookingNotElapsed,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotPermitted => "not permitted to delete this reservation",
            Self::PendingMustCancel => "pending reservations must be cancelled first",
            Self::BookingNotElapsed => "approved reservations can be deleted once they have ended",
        })
    }
}

/// Outcome of a retention check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum RetentionDecision {
    /// The record may be hard-deleted.
    Allowed,
    /// The record must be kept.
    Denied(DenialReason),
}

impl RetentionDecision {
    /// Returns `true` for [`RetentionDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `actor` may delete `reservation` at local time `now`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use roomres::retention::{can_delete, DenialReason, RetentionDecision};
/// use roomres::{Actor, ReservationRequest, Role, TimeRange};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let pending = ReservationRequest::builder(1, 7, date, TimeRange::parse("09:00", "11:00").unwrap())
///     .purpose("Review")
///     .build()
///     .unwrap()
///     .into_pending(1, Utc::now());
///
/// let now = date.and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(
///     can_delete(&pending, &Actor::new(7, Role::Student), now),
///     RetentionDecision::Denied(DenialReason::PendingMustCancel)
/// );
/// ```
#[must_use]
pub fn can_delete(reservation: &Reservation, actor: &Actor, now: NaiveDateTime) -> RetentionDecision {
    if !actor.is_owner_or_admin(reservation.requester_id()) {
        return RetentionDecision::Denied(DenialReason::NotPermitted);
    }
    match reservation.status() {
        ReservationStatus::Pending => RetentionDecision::Denied(DenialReason::PendingMustCancel),
        ReservationStatus::Approved if !reservation.is_past(now) => {
            RetentionDecision::Denied(DenialReason::BookingNotElapsed)
        }
        ReservationStatus::Approved
        | ReservationStatus::Rejected
        | ReservationStatus::Cancelled
        | ReservationStatus::Completed => RetentionDecision::Allowed,
    }
}
