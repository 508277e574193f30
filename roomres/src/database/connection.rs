//! Database connection management.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` connection opened with the pragmas the crate relies on.
///
/// Each operation takes its own scoped transaction from
/// [`Database::begin_transaction`]; dropping the transaction without
/// committing rolls it back.
///
/// # Examples
///
/// ```no_run
/// use roomres::database::{Database, DatabaseConfig};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/roomres.db")).unwrap();
/// let tx = db.begin_transaction().unwrap();
/// tx.commit().unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the database, applying WAL mode, the busy timeout and foreign
    /// key enforcement, then initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] when the file is missing and
    /// auto-create is off. Otherwise returns an error if the file or its
    /// directory cannot be created, a pragma fails, or the schema version is
    /// unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode reports the resulting mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        super::migrations::check_schema_compatibility(&conn)?;
        log::debug!("opened database {}", config.path.display());

        Ok(Self { conn, config })
    }

    /// Returns the configuration the database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the underlying connection for reads outside a transaction.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Starts a write transaction that takes the database lock immediately.
    ///
    /// Taking the lock up front means a read-check-write sequence inside the
    /// transaction cannot interleave with another writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] when the lock is not obtained within
    /// the busy timeout.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e, seconds))
    }
}

/// Maps `SQLITE_BUSY`/`SQLITE_LOCKED` to [`Error::LockTimeout`].
fn lock_error(err: rusqlite::Error, seconds: u64) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::LockTimeout { seconds },
        _ => Error::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_sets_pragmas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db.connection().execute("CREATE TABLE test (id INTEGER)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("test.db");

        let err = Database::open(DatabaseConfig::new(&path).without_auto_create()).unwrap_err();
        match err {
            Error::DataDirectoryNotFound { path: missing } => {
                assert_eq!(missing, dir.path().join("absent"));
            }
            other => panic!("expected DataDirectoryNotFound, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_second_writer_times_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut first = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut second = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let _held = first.begin_transaction().unwrap();
        let err = second.begin_transaction().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
        {
            let tx = db.begin_transaction().unwrap();
            tx.execute(
                "INSERT INTO rooms (room_number, building, capacity, room_type) VALUES ('1', 'A', 5, 'lab')",
                [],
            )
            .unwrap();
        }
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
