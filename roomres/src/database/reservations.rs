//! Reservation queries.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rusqlite::{params, Connection, OptionalExtension};

use crate::conflict::BookedSlot;
use crate::error::{Error, Result};
use crate::interval::TimeRange;
use crate::reservation::{Reservation, ReservationRequest, ReservationStatus};
use crate::user::{Actor, Classification};

use super::connection::Database;
use super::{
    conversion_error, date_column, date_text, from_unix, parse_column, time_column, time_text,
    to_unix,
};

const SELECT_RESERVATION_COLUMNS: &str = r"
    SELECT r.id, r.room_id, r.user_id, r.date, r.start_time, r.end_time, r.purpose,
           r.status, r.admin_notes, r.course, r.year, r.block, r.created_at, r.updated_at
    FROM reservations r
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (room_id, user_id, date, start_time, end_time, purpose, status,
     course, year, block, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, ?, ?, ?, ?)
";

// Guarded on the expected status so a concurrent change is detected.
const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, admin_notes = COALESCE(?, admin_notes), updated_at = ?
    WHERE id = ? AND status = ?
";

const SELECT_BOOKED_SLOTS: &str = r"
    SELECT r.id, r.room_id, r.user_id, r.date, r.start_time, r.end_time, r.purpose,
           r.status, r.admin_notes, r.course, r.year, r.block, r.created_at, r.updated_at,
           u.name
    FROM reservations r
    JOIN users u ON u.id = r.user_id
    WHERE r.room_id = ? AND r.date = ? AND r.status IN ('pending', 'approved')
    ORDER BY r.start_time, r.id
";

const SELECT_UPCOMING_SLOTS: &str = r"
    SELECT r.id, r.room_id, r.user_id, r.date, r.start_time, r.end_time, r.purpose,
           r.status, r.admin_notes, r.course, r.year, r.block, r.created_at, r.updated_at,
           u.name
    FROM reservations r
    JOIN users u ON u.id = r.user_id
    WHERE r.room_id = ? AND r.date >= ? AND r.status IN ('pending', 'approved')
    ORDER BY r.date, r.start_time, r.id
";

const SELECT_UPCOMING_HOLDERS: &str = r"
    SELECT id, user_id
    FROM reservations
    WHERE room_id = ? AND date >= ? AND status IN ('pending', 'approved')
    ORDER BY date, start_time, id
";

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let time_range = TimeRange::new(time_column(row, 4)?, time_column(row, 5)?)
        .map_err(|e| conversion_error(5, e))?;
    Ok(Reservation {
        id: row.get(0)?,
        room_id: row.get(1)?,
        requester_id: row.get(2)?,
        date: date_column(row, 3)?,
        time_range,
        purpose: row.get(6)?,
        status: parse_column(row, 7)?,
        admin_notes: row.get(8)?,
        classification: Classification {
            course: row.get(9)?,
            year: row.get(10)?,
            block: row.get(11)?,
        },
        created_at: from_unix(row, 12)?,
        updated_at: from_unix(row, 13)?,
    })
}

/// Criteria for listing reservations. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations owned by this user.
    pub user_id: Option<i64>,
    /// Only reservations in this room.
    pub room_id: Option<i64>,
    /// Only reservations on this date.
    pub date: Option<NaiveDate>,
    /// Only reservations with this stored status.
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    /// Restricts the filter to one owner.
    #[must_use]
    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl Database {
    /// Inserts a pending reservation.
    ///
    /// Performs no conflict check; callers run it inside the same
    /// transaction first.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(
        conn: &Connection,
        request: &ReservationRequest,
        at: DateTime<Utc>,
    ) -> Result<Reservation> {
        let range = request.time_range();
        let classification = request.classification();
        conn.execute(
            INSERT_RESERVATION,
            params![
                request.room_id(),
                request.requester_id(),
                date_text(request.date()),
                time_text(range.start()),
                time_text(range.end()),
                request.purpose(),
                classification.course,
                classification.year,
                classification.block,
                to_unix(at),
                to_unix(at),
            ],
        )?;

        // Round-trip through storage precision
        let at = DateTime::from_timestamp(to_unix(at), 0).unwrap_or(at);
        Ok(request.clone().into_pending(conn.last_insert_rowid(), at))
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION_COLUMNS} WHERE r.id = ?");
        Ok(conn.query_row(&sql, [id], row_to_reservation).optional()?)
    }

    /// Looks up a reservation by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn require_reservation(conn: &Connection, id: i64) -> Result<Reservation> {
        Self::get_reservation(conn, id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// Looks up a reservation on behalf of `actor`.
    ///
    /// Non-admins get the same [`Error::Unauthorized`] for someone else's
    /// reservation and for an id that does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id when `actor` is an
    /// admin, [`Error::Unauthorized`] as above.
    pub fn require_visible_reservation(
        conn: &Connection,
        id: i64,
        actor: &Actor,
        action: &str,
    ) -> Result<Reservation> {
        match Self::get_reservation(conn, id)? {
            Some(reservation) if actor.is_owner_or_admin(reservation.requester_id()) => {
                Ok(reservation)
            }
            None if actor.is_admin() => Err(Error::not_found(format!("reservation {id}"))),
            _ => Err(Error::unauthorized(action)),
        }
    }

    /// Pending and approved reservations for `room_id` on `date`, ordered by
    /// start time, with their requesters' names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn booked_slots(conn: &Connection, room_id: i64, date: NaiveDate) -> Result<Vec<BookedSlot>> {
        let mut stmt = conn.prepare(SELECT_BOOKED_SLOTS)?;
        let slots = stmt
            .query_map(params![room_id, date_text(date)], |row| {
                Ok(BookedSlot {
                    reservation: row_to_reservation(row)?,
                    requester_name: row.get(14)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slots)
    }

    /// Pending and approved reservations for `room_id` on or after `from`
    /// that fall on `weekday`, with their requesters' names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn upcoming_slots_on(
        conn: &Connection,
        room_id: i64,
        from: NaiveDate,
        weekday: Weekday,
    ) -> Result<Vec<BookedSlot>> {
        let mut stmt = conn.prepare(SELECT_UPCOMING_SLOTS)?;
        let slots = stmt
            .query_map(params![room_id, date_text(from)], |row| {
                Ok(BookedSlot {
                    reservation: row_to_reservation(row)?,
                    requester_name: row.get(14)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slots
            .into_iter()
            .filter(|slot| slot.reservation.date().weekday() == weekday)
            .collect())
    }

    /// Moves a reservation from `expected` to `status`.
    ///
    /// Existing notes are kept when `notes` is `None`. Returns `false` when
    /// the reservation is missing or no longer in `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_status(
        conn: &Connection,
        id: i64,
        expected: ReservationStatus,
        status: ReservationStatus,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_STATUS,
            params![status.as_str(), notes, to_unix(at), id, expected.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Hard-deletes a reservation. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation(conn: &Connection, id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM reservations WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    /// Lists reservations matching `filter`, newest booking date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_reservations(conn: &Connection, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{SELECT_RESERVATION_COLUMNS}
             WHERE (?1 IS NULL OR r.user_id = ?1)
               AND (?2 IS NULL OR r.room_id = ?2)
               AND (?3 IS NULL OR r.date = ?3)
               AND (?4 IS NULL OR r.status = ?4)
             ORDER BY r.date DESC, r.start_time, r.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(
                params![
                    filter.user_id,
                    filter.room_id,
                    filter.date.map(date_text),
                    filter.status.map(ReservationStatus::as_str),
                ],
                row_to_reservation,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// `(reservation id, owner id)` of pending or approved reservations in
    /// `room_id` on or after `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn upcoming_holders(conn: &Connection, room_id: i64, from: NaiveDate) -> Result<Vec<(i64, i64)>> {
        let mut stmt = conn.prepare(SELECT_UPCOMING_HOLDERS)?;
        let holders = stmt
            .query_map(params![room_id, date_text(from)], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(holders)
    }
}
