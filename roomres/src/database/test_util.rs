//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::interval::TimeRange;
use crate::reservation::ReservationRequest;
use crate::room::{NewRoom, RoomType};
use crate::user::{NewUser, Role, User};

/// Creates a database in a temporary directory that outlives the test.
#[must_use]
pub fn create_test_database() -> Database {
    create_test_database_at().0
}

/// Like [`create_test_database`], also returning the config so a second
/// connection can be opened on the same file.
#[must_use]
pub fn create_test_database_at() -> (Database, DatabaseConfig) {
    let dir = tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"));
    let db = Database::open(config.clone()).unwrap();

    // Keep the directory for the rest of the test process
    std::mem::forget(dir);

    (db, config)
}

/// 2025-03-10, a Monday.
#[must_use]
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// A 30-seat classroom in the Main building.
#[must_use]
pub fn sample_room(number: &str) -> NewRoom {
    NewRoom {
        room_number: number.to_string(),
        building: "Main".to_string(),
        capacity: 30,
        room_type: RoomType::Classroom,
        equipment: Some("Projector".to_string()),
    }
}

/// Inserts a user whose e-mail is derived from `name`.
pub fn seed_user(conn: &Connection, name: &str, role: Role) -> User {
    let email = format!(
        "{}@example.edu",
        name.to_lowercase().replace(|c: char| !c.is_ascii_alphanumeric(), "")
    );
    Database::insert_user(conn, NewUser::new(name, email, role))
        .unwrap()
        .0
}

/// A request for [`monday`] between `start` and `end`.
#[must_use]
pub fn request(room_id: i64, requester_id: i64, start: &str, end: &str) -> ReservationRequest {
    ReservationRequest::builder(room_id, requester_id, monday(), TimeRange::parse(start, end).unwrap())
        .purpose("Study group")
        .build()
        .unwrap()
}
