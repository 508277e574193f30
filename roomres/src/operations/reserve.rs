//! Reservation request planning.
//!
//! Checks the room and requester, fills in the requester's classification
//! and refuses the request when anything already occupies the slot.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::config::Config;
use crate::conflict::check_conflicts;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::ReservationRequest;
use crate::user::Actor;

use super::plan::{OperationPlan, PlanAction};

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The validated request.
    pub request: ReservationRequest,

    /// Who is submitting it. `None` means the requester themselves.
    pub actor: Option<Actor>,

    /// Local time used to flag requests for slots that already started.
    pub now: Option<NaiveDateTime>,
}

impl ReserveOptions {
    /// Creates options for `request`, submitted by its requester.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roomres::operations::ReserveOptions;
    /// use roomres::{Actor, ReservationRequest, Role, TimeRange};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let request = ReservationRequest::builder(1, 7, date, TimeRange::parse("09:00", "10:00").unwrap())
    ///     .purpose("Tutoring")
    ///     .build()
    ///     .unwrap();
    ///
    /// let options = ReserveOptions::new(request).with_actor(Some(Actor::new(1, Role::Admin)));
    /// assert!(options.actor.is_some());
    /// ```
    #[must_use]
    pub const fn new(request: ReservationRequest) -> Self {
        Self {
            request,
            actor: None,
            now: None,
        }
    }

    /// Sets the submitting actor.
    #[must_use]
    pub const fn with_actor(mut self, actor: Option<Actor>) -> Self {
        self.actor = actor;
        self
    }

    /// Sets the current local time.
    #[must_use]
    pub const fn with_now(mut self, now: Option<NaiveDateTime>) -> Self {
        self.now = now;
        self
    }
}

/// A planned reservation request.
pub struct ReservePlan<'a> {
    options: ReserveOptions,
    config: &'a Config,
}

impl<'a> ReservePlan<'a> {
    /// Creates a new reserve plan.
    #[must_use]
    pub const fn new(options: ReserveOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Builds the plan.
    ///
    /// Run it inside the transaction that will execute it so the conflict
    /// check and the insert see the same data.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] when a non-admin submits for someone else
    /// - [`Error::NotFound`] for an unknown room or requester
    /// - [`Error::Validation`] when the room is flagged unavailable and
    ///   `booking.require_available_room` is on
    /// - [`Error::ReservationConflict`] with every overlapping reservation
    ///   and class
    pub fn build_plan(self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.options.request;
        if let Some(actor) = self.options.actor {
            if !actor.is_owner_or_admin(request.requester_id()) {
                return Err(Error::unauthorized("book a room for another user"));
            }
        }

        let room = Database::require_room(conn, request.room_id())?;
        let requester = Database::require_user(conn, request.requester_id())?;

        let mut plan = OperationPlan::new(format!(
            "Request {} on {} at {}",
            room.label(),
            request.date(),
            request.time_range()
        ));

        if !room.is_available {
            if self.config.require_available_room() {
                return Err(Error::Validation {
                    field: "room_id".into(),
                    message: format!("room {} is not available for booking", room.label()),
                });
            }
            plan = plan.add_warning(format!("room {} is flagged unavailable", room.label()));
        }

        if let Some(now) = self.options.now {
            if request.date().and_time(request.time_range().start()) < now {
                plan = plan.add_warning("the requested slot has already started");
            }
        }

        let conflicts = check_conflicts(conn, room.id, request.date(), &request.time_range())?;
        if !conflicts.is_empty() {
            return Err(Error::ReservationConflict { conflicts });
        }

        let request = self
            .options
            .request
            .with_default_classification(&requester.classification);
        Ok(plan.add_action(PlanAction::InsertReservation(request)))
    }
}
