//! Room queries.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::{Error, Result};
use crate::room::{NewRoom, Room};

use super::connection::Database;
use super::parse_column;

const SELECT_ROOM_COLUMNS: &str = r"
    SELECT id, room_number, building, capacity, room_type, equipment, is_available
    FROM rooms
";

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (room_number, building, capacity, room_type, equipment, is_available)
    VALUES (?, ?, ?, ?, ?, 1)
";

const UPDATE_ROOM: &str = r"
    UPDATE rooms
    SET room_number = ?, building = ?, capacity = ?, room_type = ?, equipment = ?
    WHERE id = ?
";

const UPDATE_ROOM_AVAILABILITY: &str = "UPDATE rooms SET is_available = ? WHERE id = ?";

fn duplicate_room(e: rusqlite::Error, room: &NewRoom) -> Error {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => Error::Validation {
            field: "room_number".into(),
            message: format!(
                "room {} already exists in {}",
                room.room_number, room.building
            ),
        },
        _ => Error::Database(e),
    }
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        room_number: row.get(1)?,
        building: row.get(2)?,
        capacity: row.get(3)?,
        room_type: parse_column(row, 4)?,
        equipment: row.get(5)?,
        is_available: row.get(6)?,
    })
}

impl Database {
    /// Inserts a room and returns it with its new id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room fails validation or the
    /// building already has a room with that number.
    pub fn insert_room(conn: &Connection, room: NewRoom) -> Result<Room> {
        let room = room.validate()?;
        conn.execute(
            INSERT_ROOM,
            params![
                room.room_number,
                room.building,
                room.capacity,
                room.room_type.as_str(),
                room.equipment,
            ],
        )
        .map_err(|e| duplicate_room(e, &room))?;

        Ok(Room {
            id: conn.last_insert_rowid(),
            room_number: room.room_number,
            building: room.building,
            capacity: room.capacity,
            room_type: room.room_type,
            equipment: room.equipment,
            is_available: true,
        })
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>> {
        let sql = format!("{SELECT_ROOM_COLUMNS} WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_room).optional()?)
    }

    /// Looks up a room by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn require_room(conn: &Connection, id: i64) -> Result<Room> {
        Self::get_room(conn, id)?.ok_or_else(|| Error::not_found(format!("room {id}")))
    }

    /// Lists every room ordered by building and number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let sql = format!("{SELECT_ROOM_COLUMNS} ORDER BY building, room_number");
        let mut stmt = conn.prepare(&sql)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Replaces a room's descriptive fields. The availability flag is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id and a validation error
    /// for malformed input or a number already used in the building.
    pub fn update_room(conn: &Connection, id: i64, room: NewRoom) -> Result<Room> {
        let room = room.validate()?;
        let rows = conn
            .execute(
                UPDATE_ROOM,
                params![
                    room.room_number,
                    room.building,
                    room.capacity,
                    room.room_type.as_str(),
                    room.equipment,
                    id,
                ],
            )
            .map_err(|e| duplicate_room(e, &room))?;
        if rows == 0 {
            return Err(Error::not_found(format!("room {id}")));
        }
        Self::require_room(conn, id)
    }

    /// Deletes a room together with its classes and reservations. Returns
    /// `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_room(conn: &Connection, id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM rooms WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    /// Sets the administrative availability flag.
    ///
    /// Returns `false` if the room does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_room_availability(conn: &Connection, id: i64, available: bool) -> Result<bool> {
        let rows = conn.execute(UPDATE_ROOM_AVAILABILITY, params![available, id])?;
        Ok(rows > 0)
    }
}
