//! Database layer for persistent storage of rooms, schedules, users,
//! reservations and notifications.
//!
//! Queries are associated functions taking a `&Connection`, so they run the
//! same way against a plain connection or inside a transaction from
//! [`Database::begin_transaction`].
//!
//! # Examples
//!
//! ```no_run
//! use roomres::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/roomres.db")).unwrap();
//! for room in Database::list_rooms(db.connection()).unwrap() {
//!     println!("{} ({} seats)", room.label(), room.capacity);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod notifications;
mod reservations;
mod rooms;
mod schedules;
mod schema;
mod users;

#[cfg(test)]
pub(crate) mod test_util;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::Type;

pub use config::{default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE, DATA_DIR_ENV};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use notifications::StoredNotification;
pub use reservations::ReservationFilter;

use crate::interval::{DATE_FORMAT, TIME_FORMAT};

pub(crate) fn to_unix(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn from_unix(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {secs} out of range").into(),
        )
    })
}

fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| conversion_error(idx, e))
}

fn date_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn time_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveTime> {
    let text: String = row.get(idx)?;
    NaiveTime::parse_from_str(&text, TIME_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn date_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn time_text(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
