//! Reservation status transitions and who may perform them.
//!
//! ```text
//! pending ──approve──▶ approved ──cancel──▶ cancelled
//!    │  └──reject───▶ rejected
//!    └─────cancel────────────────────────▶ cancelled
//! ```
//!
//! Authorization is decided before the current state is examined, so a
//! caller without the right never learns anything from a state error.

use crate::error::{Error, Result};
use crate::notify::NotificationKind;
use crate::reservation::{Reservation, ReservationStatus};
use crate::user::Actor;

/// An authorized status change ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status the reservation is in now.
    pub from: ReservationStatus,
    /// Status it moves to.
    pub to: ReservationStatus,
    /// User the resulting notification is attributed to; `None` when the
    /// owner acts on their own booking.
    pub attributed_to: Option<i64>,
}

impl Transition {
    /// The notification sent to the owner for this change.
    #[must_use]
    pub const fn notification_kind(&self) -> NotificationKind {
        match self.to {
            ReservationStatus::Approved => NotificationKind::Approved,
            ReservationStatus::Rejected => NotificationKind::Rejected,
            _ => NotificationKind::Cancelled,
        }
    }
}

/// Returns the statuses `current` may move to.
#[must_use]
pub const fn allowed_targets(current: ReservationStatus) -> &'static [ReservationStatus] {
    match current {
        ReservationStatus::Pending => &[
            ReservationStatus::Approved,
            ReservationStatus::Rejected,
            ReservationStatus::Cancelled,
        ],
        ReservationStatus::Approved => &[ReservationStatus::Cancelled],
        _ => &[],
    }
}

/// Decides whether `actor` may move `reservation` to `requested`.
///
/// # Errors
///
/// - [`Error::Unauthorized`] when a non-admin approves or rejects, or when
///   someone other than the owner or an admin cancels.
/// - [`Error::InvalidTransition`] when the requested status is not
///   reachable from the current one, including any request for `pending`
///   or `completed`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use roomres::lifecycle::authorize_transition;
/// use roomres::{Actor, Error, ReservationRequest, ReservationStatus, Role, TimeRange};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let pending = ReservationRequest::builder(1, 7, date, TimeRange::parse("09:00", "11:00").unwrap())
///     .purpose("Review")
///     .build()
///     .unwrap()
///     .into_pending(1, Utc::now());
///
/// let owner = Actor::new(7, Role::Student);
/// let result = authorize_transition(&pending, &owner, ReservationStatus::Approved);
/// assert!(matches!(result, Err(Error::Unauthorized { .. })));
///
/// let admin = Actor::new(1, Role::Admin);
/// let transition = authorize_transition(&pending, &admin, ReservationStatus::Approved).unwrap();
/// assert_eq!(transition.attributed_to, Some(1));
/// ```
pub fn authorize_transition(
    reservation: &Reservation,
    actor: &Actor,
    requested: ReservationStatus,
) -> Result<Transition> {
    match requested {
        ReservationStatus::Approved | ReservationStatus::Rejected if !actor.is_admin() => {
            return Err(Error::unauthorized(format!(
                "mark reservations as {requested}"
            )));
        }
        ReservationStatus::Cancelled if !actor.is_owner_or_admin(reservation.requester_id()) => {
            return Err(Error::unauthorized("cancel this reservation"));
        }
        _ => {}
    }

    let current = reservation.status();
    if !allowed_targets(current).contains(&requested) {
        return Err(Error::InvalidTransition { current, requested });
    }

    let self_service =
        requested == ReservationStatus::Cancelled && actor.owns(reservation.requester_id());
    Ok(Transition {
        from: current,
        to: requested,
        attributed_to: (!self_service).then_some(actor.user_id),
    })
}
