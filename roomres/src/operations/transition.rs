//! Status change planning.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::lifecycle::authorize_transition;
use crate::reservation::ReservationStatus;
use crate::user::Actor;

use super::plan::{OperationPlan, PlanAction};

/// Options for a status change.
#[derive(Debug, Clone)]
pub struct TransitionOptions {
    /// The reservation to change.
    pub reservation_id: i64,
    /// Who is acting.
    pub actor: Actor,
    /// Requested status.
    pub status: ReservationStatus,
    /// Notes to store in `admin_notes`. Only kept for administrators.
    pub notes: Option<String>,
}

impl TransitionOptions {
    /// Creates options without notes.
    #[must_use]
    pub const fn new(reservation_id: i64, actor: Actor, status: ReservationStatus) -> Self {
        Self {
            reservation_id,
            actor,
            status,
            notes: None,
        }
    }

    /// Sets the notes. Blank text is treated as absent.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }
}

/// A planned status change.
pub struct TransitionPlan {
    options: TransitionOptions,
}

impl TransitionPlan {
    /// Creates a new transition plan.
    #[must_use]
    pub const fn new(options: TransitionOptions) -> Self {
        Self { options }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when an admin names an unknown
    /// reservation, [`crate::Error::Unauthorized`] when anyone else names a
    /// reservation that is unknown or not theirs, and the errors of
    /// [`authorize_transition`] otherwise.
    pub fn build_plan(self, conn: &Connection) -> Result<OperationPlan> {
        let TransitionOptions {
            reservation_id,
            actor,
            status,
            notes,
        } = self.options;

        let reservation = Database::require_visible_reservation(
            conn,
            reservation_id,
            &actor,
            "change this reservation",
        )?;
        let transition = authorize_transition(&reservation, &actor, status)?;

        let mut plan = OperationPlan::new(format!(
            "Mark reservation #{reservation_id} as {status}"
        ));
        let notes = if actor.is_admin() {
            notes
        } else {
            if notes.is_some() {
                plan = plan.add_warning("notes are only recorded for administrator actions");
            }
            None
        };

        Ok(plan.add_action(PlanAction::UpdateStatus {
            reservation,
            transition,
            notes,
        }))
    }
}
