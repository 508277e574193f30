//! Plan types for booking operations.
//!
//! A plan lists the writes an operation will make once every rule has been
//! checked. Plans are built and executed on the same connection, normally
//! inside one write transaction.

use crate::lifecycle::Transition;
use crate::notify::NotificationEvent;
use crate::reservation::{Reservation, ReservationRequest};

/// A single write performed during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Store a new pending reservation and notify its owner.
    InsertReservation(ReservationRequest),

    /// Move a reservation to a new status and notify its owner.
    UpdateStatus {
        /// The reservation as read while planning.
        reservation: Reservation,
        /// The authorized change.
        transition: Transition,
        /// Administrator notes to store.
        notes: Option<String>,
    },

    /// Hard-delete a reservation record.
    DeleteReservation(i64),

    /// Flip a room's availability flag.
    SetRoomAvailability {
        /// The room.
        room_id: i64,
        /// The new flag value.
        available: bool,
    },

    /// Queue an event for dispatch after commit.
    Notify(NotificationEvent),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InsertReservation(request) => format!(
                "Create pending reservation for room {} on {} at {}",
                request.room_id(),
                request.date(),
                request.time_range()
            ),
            Self::UpdateStatus {
                reservation,
                transition,
                ..
            } => format!(
                "Move reservation #{} from {} to {}",
                reservation.id(),
                transition.from,
                transition.to
            ),
            Self::DeleteReservation(id) => format!("Delete reservation #{id}"),
            Self::SetRoomAvailability { room_id, available } => {
                let state = if *available { "available" } else { "unavailable" };
                format!("Mark room {room_id} as {state}")
            }
            Self::Notify(event) => format!(
                "Notify user {} about reservation #{} ({})",
                event.owner_id, event.reservation_id, event.kind
            ),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomres::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel reservation #4");
    /// assert_eq!(plan.description, "Cancel reservation #4");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomres::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test").add_warning("room is flagged unavailable");
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::reservation::ReservationStatus;
    use chrono::{NaiveDate, Utc};

    fn request() -> ReservationRequest {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        ReservationRequest::builder(3, 7, date, crate::TimeRange::parse("09:00", "10:30").unwrap())
            .purpose("Lab makeup")
            .build()
            .unwrap()
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            PlanAction::InsertReservation(request()).description(),
            "Create pending reservation for room 3 on 2025-03-10 at 09:00-10:30"
        );

        let reservation = request().into_pending(12, Utc::now());
        let action = PlanAction::UpdateStatus {
            reservation,
            transition: Transition {
                from: ReservationStatus::Pending,
                to: ReservationStatus::Approved,
                attributed_to: Some(1),
            },
            notes: None,
        };
        assert_eq!(
            action.description(),
            "Move reservation #12 from pending to approved"
        );

        assert_eq!(
            PlanAction::SetRoomAvailability {
                room_id: 2,
                available: false
            }
            .description(),
            "Mark room 2 as unavailable"
        );

        let event = NotificationEvent::new(NotificationKind::RoomAvailability, 5, 9);
        assert_eq!(
            PlanAction::Notify(event).description(),
            "Notify user 9 about reservation #5 (room_availability)"
        );
    }

    #[test]
    fn test_plan_accumulates() {
        let plan = OperationPlan::new("Delete")
            .add_action(PlanAction::DeleteReservation(1))
            .add_warning("careful");
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_empty());
        assert_eq!(plan.warnings, vec!["careful".to_string()]);
    }
}
