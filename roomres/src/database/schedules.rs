//! Class schedule queries.

use chrono::Weekday;
use rusqlite::{params, Connection};

use crate::conflict::ClassSlot;
use crate::error::Result;
use crate::interval::TimeRange;
use crate::schedule::{parse_weekday, weekday_name, ClassSchedule, NewClassSchedule};

use super::connection::Database;
use super::{conversion_error, time_column, time_text};

const SELECT_SCHEDULE_COLUMNS: &str = r"
    SELECT s.id, s.room_id, s.instructor_id, s.course_code, s.course_name,
           s.day_of_week, s.start_time, s.end_time, u.name
    FROM class_schedules s
    JOIN users u ON u.id = s.instructor_id
";

const INSERT_SCHEDULE: &str = r"
    INSERT INTO class_schedules
    (room_id, instructor_id, course_code, course_name, day_of_week, start_time, end_time)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

fn row_to_slot(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClassSlot> {
    let time_range = TimeRange::new(time_column(row, 6)?, time_column(row, 7)?)
        .map_err(|e| conversion_error(7, e))?;
    let day_text: String = row.get(5)?;
    let day_of_week = parse_weekday(&day_text).map_err(|e| conversion_error(5, e))?;
    Ok(ClassSlot {
        schedule: ClassSchedule {
            id: row.get(0)?,
            room_id: row.get(1)?,
            instructor_id: row.get(2)?,
            course_code: row.get(3)?,
            course_name: row.get(4)?,
            day_of_week,
            time_range,
        },
        instructor_name: row.get(8)?,
    })
}

impl Database {
    /// Inserts a class into the weekly timetable.
    ///
    /// Does not check for overlaps with other classes; callers do that in
    /// the same transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input and
    /// [`Error::NotFound`] when the room or instructor does not exist.
    pub fn insert_schedule(conn: &Connection, schedule: NewClassSchedule) -> Result<ClassSchedule> {
        let schedule = schedule.validate()?;
        Self::require_room(conn, schedule.room_id)?;
        Self::require_user(conn, schedule.instructor_id)?;

        conn.execute(
            INSERT_SCHEDULE,
            params![
                schedule.room_id,
                schedule.instructor_id,
                schedule.course_code,
                schedule.course_name,
                weekday_name(schedule.day_of_week),
                time_text(schedule.time_range.start()),
                time_text(schedule.time_range.end()),
            ],
        )?;

        Ok(ClassSchedule {
            id: conn.last_insert_rowid(),
            room_id: schedule.room_id,
            instructor_id: schedule.instructor_id,
            course_code: schedule.course_code,
            course_name: schedule.course_name,
            day_of_week: schedule.day_of_week,
            time_range: schedule.time_range,
        })
    }

    /// Classes meeting in `room_id` on `day`, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn class_slots(conn: &Connection, room_id: i64, day: Weekday) -> Result<Vec<ClassSlot>> {
        let sql = format!(
            "{SELECT_SCHEDULE_COLUMNS} WHERE s.room_id = ? AND s.day_of_week = ? ORDER BY s.start_time, s.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let slots = stmt
            .query_map(params![room_id, weekday_name(day)], row_to_slot)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slots)
    }

    /// Lists the timetable, optionally for one room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_schedules(conn: &Connection, room_id: Option<i64>) -> Result<Vec<ClassSlot>> {
        let sql = format!(
            "{SELECT_SCHEDULE_COLUMNS} WHERE (?1 IS NULL OR s.room_id = ?1) ORDER BY s.room_id, s.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut slots = stmt
            .query_map(params![room_id], row_to_slot)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        slots.sort_by_key(|slot| {
            (
                slot.schedule.room_id,
                slot.schedule.day_of_week.num_days_from_monday(),
                slot.schedule.time_range.start(),
            )
        });
        Ok(slots)
    }

    /// Removes a class from the timetable. Returns `false` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_schedule(conn: &Connection, id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM class_schedules WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
