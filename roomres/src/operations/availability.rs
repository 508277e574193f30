//! Room availability changes.
//!
//! The flag only gates new bookings. Existing reservations are left alone;
//! their owners are told about the change.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::notify::{NotificationEvent, NotificationKind};
use crate::user::Actor;

use super::plan::{OperationPlan, PlanAction};

/// Options for flipping a room's availability.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityOptions {
    /// The room.
    pub room_id: i64,
    /// The new flag value.
    pub available: bool,
    /// Who is acting. Must be an admin.
    pub actor: Actor,
    /// Reservations on or after this date are notified.
    pub from: NaiveDate,
}

/// A planned availability change.
pub struct AvailabilityPlan {
    options: AvailabilityOptions,
}

impl AvailabilityPlan {
    /// Creates a new availability plan.
    #[must_use]
    pub const fn new(options: AvailabilityOptions) -> Self {
        Self { options }
    }

    /// Builds the plan.
    ///
    /// Setting the flag to its current value yields an empty plan with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] for an unknown room.
    pub fn build_plan(self, conn: &Connection) -> Result<OperationPlan> {
        let AvailabilityOptions {
            room_id,
            available,
            actor,
            from,
        } = self.options;
        if !actor.is_admin() {
            return Err(Error::unauthorized("change room availability"));
        }

        let room = Database::require_room(conn, room_id)?;
        let state = if available { "available" } else { "unavailable" };
        let plan = OperationPlan::new(format!("Mark room {} as {state}", room.label()));
        if room.is_available == available {
            return Ok(plan.add_warning(format!("room {} is already {state}", room.label())));
        }

        let detail = format!("room {} is now {state}", room.label());
        let mut plan = plan.add_action(PlanAction::SetRoomAvailability { room_id, available });
        for (reservation_id, owner_id) in Database::upcoming_holders(conn, room_id, from)? {
            plan = plan.add_action(PlanAction::Notify(
                NotificationEvent::new(NotificationKind::RoomAvailability, reservation_id, owner_id)
                    .by(Some(actor.user_id))
                    .with_detail(Some(detail.clone())),
            ));
        }
        Ok(plan)
    }
}
