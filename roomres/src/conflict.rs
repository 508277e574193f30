//! Conflict detection for candidate bookings.
//!
//! A candidate `(room, date, time range)` conflicts with every pending or
//! approved reservation for the same room and date, and with every class
//! meeting in that room on the date's weekday, whose time range overlaps it.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Result;
use crate::interval::TimeRange;
use crate::reservation::{Reservation, ReservationStatus};
use crate::schedule::ClassSchedule;

/// The source of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// Another pending or approved reservation.
    Reservation,
    /// A recurring class.
    Class,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reservation => f.write_str("reservation"),
            Self::Class => f.write_str("class"),
        }
    }
}

/// One booking that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Reservation or class.
    pub kind: ConflictKind,
    /// Id of the reservation or class schedule.
    pub source_id: i64,
    /// Requester or instructor name.
    pub party: String,
    /// Reservation purpose, or `course_code course_name` for a class.
    pub label: String,
    /// When the conflicting booking runs.
    pub time_range: TimeRange,
    /// Status of a conflicting reservation; `None` for classes.
    pub status: Option<ReservationStatus>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} #{} '{}' by {} at {} ({status})",
                self.kind, self.source_id, self.label, self.party, self.time_range
            ),
            None => write!(
                f,
                "{} {} taught by {} at {}",
                self.kind, self.label, self.party, self.time_range
            ),
        }
    }
}

/// A stored reservation with its requester's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedSlot {
    /// The reservation.
    pub reservation: Reservation,
    /// Display name of the requester.
    pub requester_name: String,
}

/// A class with its instructor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSlot {
    /// The class.
    pub schedule: ClassSchedule,
    /// Display name of the instructor.
    pub instructor_name: String,
}

impl From<&BookedSlot> for Conflict {
    fn from(slot: &BookedSlot) -> Self {
        Self {
            kind: ConflictKind::Reservation,
            source_id: slot.reservation.id(),
            party: slot.requester_name.clone(),
            label: slot.reservation.purpose().to_string(),
            time_range: slot.reservation.time_range(),
            status: Some(slot.reservation.status()),
        }
    }
}

impl From<&ClassSlot> for Conflict {
    fn from(slot: &ClassSlot) -> Self {
        Self {
            kind: ConflictKind::Class,
            source_id: slot.schedule.id,
            party: slot.instructor_name.clone(),
            label: slot.schedule.label(),
            time_range: slot.schedule.time_range,
            status: None,
        }
    }
}

/// Selects the bookings overlapping `candidate`, reservations first.
///
/// Inactive reservations are ignored even if present in `reservations`.
/// Input order is preserved within each group.
#[must_use]
pub fn find_conflicts(
    candidate: &TimeRange,
    reservations: &[BookedSlot],
    classes: &[ClassSlot],
) -> Vec<Conflict> {
    let booked = reservations
        .iter()
        .filter(|slot| slot.reservation.status().is_active())
        .filter(|slot| slot.reservation.time_range().overlaps(candidate))
        .map(Conflict::from);
    let taught = classes
        .iter()
        .filter(|slot| slot.schedule.time_range.overlaps(candidate))
        .map(Conflict::from);
    booked.chain(taught).collect()
}

/// Loads the room's bookings for `date` and returns those overlapping
/// `range`.
///
/// Read-only; run it inside the writing transaction when the answer gates
/// an insert.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn check_conflicts(
    conn: &Connection,
    room_id: i64,
    date: NaiveDate,
    range: &TimeRange,
) -> Result<Vec<Conflict>> {
    let reservations = Database::booked_slots(conn, room_id, date)?;
    let classes = Database::class_slots(conn, room_id, date.weekday())?;
    let conflicts = find_conflicts(range, &reservations, &classes);
    log::debug!(
        "room {room_id} on {date} at {range}: {} conflict(s) among {} reservation(s) and {} class(es)",
        conflicts.len(),
        reservations.len(),
        classes.len()
    );
    Ok(conflicts)
}
