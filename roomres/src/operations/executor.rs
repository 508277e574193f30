//! Plan execution engine.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::notify::{NotificationEvent, NotificationKind};
use crate::reservation::Reservation;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation created or updated, if any.
    pub reservation: Option<Reservation>,

    /// Events to dispatch once the surrounding transaction commits.
    pub events: Vec<NotificationEvent>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: None,
            events: Vec::new(),
        }
    }
}

/// Applies operation plans to a connection.
///
/// The executor never commits. Callers pass the transaction the plan was
/// built in and commit it once `execute` returns, then dispatch
/// [`ExecutionResult::events`].
///
/// # Examples
///
/// ```no_run
/// use roomres::operations::{OperationPlan, PlanExecutor};
/// use roomres::{Database, DatabaseConfig};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/roomres.db")).unwrap();
/// let tx = db.begin_transaction().unwrap();
/// let plan = OperationPlan::new("Nothing to do");
/// let result = PlanExecutor::new(&tx, chrono::Utc::now()).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(result.events.is_empty());
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    at: DateTime<Utc>,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates an executor that stamps changes with `at`.
    #[must_use]
    pub const fn new(conn: &'a Connection, at: DateTime<Utc>) -> Self {
        Self {
            conn,
            at,
            dry_run: false,
        }
    }

    /// Reports the plan without writing anything.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails. The caller's transaction
    /// should then be dropped so nothing partial is kept.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            return Ok(result);
        }

        for action in &plan.actions {
            log::debug!("executing: {}", action.description());
            self.execute_action(action, &mut result)?;
        }
        Ok(result)
    }

    fn execute_action(&self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::InsertReservation(request) => {
                let reservation = Database::insert_reservation(self.conn, request, self.at)?;
                log::info!(
                    "reservation #{} created for room {} on {} at {}",
                    reservation.id(),
                    reservation.room_id(),
                    reservation.date(),
                    reservation.time_range()
                );
                result.events.push(NotificationEvent::new(
                    NotificationKind::Created,
                    reservation.id(),
                    reservation.requester_id(),
                ));
                result.reservation = Some(reservation);
            }
            PlanAction::UpdateStatus {
                reservation,
                transition,
                notes,
            } => {
                let updated = Database::update_reservation_status(
                    self.conn,
                    reservation.id(),
                    transition.from,
                    transition.to,
                    notes.as_deref(),
                    self.at,
                )?;
                if !updated {
                    let current = Database::require_reservation(self.conn, reservation.id())?;
                    return Err(Error::InvalidTransition {
                        current: current.status(),
                        requested: transition.to,
                    });
                }
                log::info!(
                    "reservation #{} moved from {} to {}",
                    reservation.id(),
                    transition.from,
                    transition.to
                );
                result.events.push(
                    NotificationEvent::new(
                        transition.notification_kind(),
                        reservation.id(),
                        reservation.requester_id(),
                    )
                    .by(transition.attributed_to)
                    .with_detail(notes.clone()),
                );
                result.reservation = Some(reservation.clone().with_status(
                    transition.to,
                    notes.clone(),
                    self.at,
                ));
            }
            PlanAction::DeleteReservation(id) => {
                if !Database::delete_reservation(self.conn, *id)? {
                    return Err(Error::not_found(format!("reservation {id}")));
                }
                log::info!("reservation #{id} deleted from history");
            }
            PlanAction::SetRoomAvailability { room_id, available } => {
                if !Database::set_room_availability(self.conn, *room_id, *available)? {
                    return Err(Error::not_found(format!("room {room_id}")));
                }
                log::info!("room {room_id} availability set to {available}");
            }
            PlanAction::Notify(event) => result.events.push(event.clone()),
        }
        Ok(())
    }
}
