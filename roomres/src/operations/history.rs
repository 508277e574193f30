//! History deletion planning.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::retention::{can_delete, DenialReason, RetentionDecision};
use crate::user::Actor;

use super::plan::{OperationPlan, PlanAction};

/// Options for deleting a reservation from history.
#[derive(Debug, Clone, Copy)]
pub struct DeleteOptions {
    /// The reservation to delete.
    pub reservation_id: i64,
    /// Who is asking.
    pub actor: Actor,
    /// Current local time.
    pub now: NaiveDateTime,
}

impl DeleteOptions {
    /// Creates delete options.
    #[must_use]
    pub const fn new(reservation_id: i64, actor: Actor, now: NaiveDateTime) -> Self {
        Self {
            reservation_id,
            actor,
            now,
        }
    }
}

/// A planned history deletion.
pub struct DeletePlan {
    options: DeleteOptions,
}

impl DeletePlan {
    /// Creates a new delete plan.
    #[must_use]
    pub const fn new(options: DeleteOptions) -> Self {
        Self { options }
    }

    /// Evaluates the retention policy without planning anything.
    ///
    /// Non-admins are told [`DenialReason::NotPermitted`] for unknown ids,
    /// the same answer they get for someone else's reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when an admin names an unknown id.
    pub fn decide(&self, conn: &Connection) -> Result<RetentionDecision> {
        let DeleteOptions {
            reservation_id,
            actor,
            now,
        } = self.options;
        match Database::get_reservation(conn, reservation_id)? {
            Some(reservation) => Ok(can_delete(&reservation, &actor, now)),
            None if actor.is_admin() => {
                Err(Error::not_found(format!("reservation {reservation_id}")))
            }
            None => Ok(RetentionDecision::Denied(DenialReason::NotPermitted)),
        }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when an admin names an unknown reservation
    /// - [`Error::Unauthorized`] when the actor is neither owner nor admin,
    ///   or a non-admin names an unknown reservation
    /// - [`Error::DeletionDenied`] while the reservation is pending or its
    ///   approved slot has not ended
    pub fn build_plan(self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.options.reservation_id;
        match self.decide(conn)? {
            RetentionDecision::Allowed => Ok(OperationPlan::new(format!(
                "Delete reservation #{id} from history"
            ))
            .add_action(PlanAction::DeleteReservation(id))),
            RetentionDecision::Denied(DenialReason::NotPermitted) => {
                Err(Error::unauthorized("delete this reservation"))
            }
            RetentionDecision::Denied(reason) => Err(Error::DeletionDenied {
                reason: reason.to_string(),
            }),
        }
    }
}
