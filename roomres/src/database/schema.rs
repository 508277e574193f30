//! Database schema definitions and SQL constants.
//!
//! Dates are stored as `YYYY-MM-DD` text, times of day as `HH:MM:SS` text
//! and timestamps as Unix seconds. Text comparison of the fixed-width time
//! format orders the same way as the times themselves.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value table holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Accounts. The access token is the opaque credential used by the
/// identity collaborator.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL CHECK (role IN ('student', 'instructor', 'admin')),
        course TEXT,
        year TEXT,
        block TEXT,
        access_token TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL
    )";

/// Rooms. `is_available` is an administrative flag.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_number TEXT NOT NULL,
        building TEXT NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        room_type TEXT NOT NULL CHECK (room_type IN ('classroom', 'lab', 'conference')),
        equipment TEXT,
        is_available INTEGER NOT NULL DEFAULT 1,
        UNIQUE (building, room_number)
    )";

/// Weekly class timetable.
pub const CREATE_CLASS_SCHEDULES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS class_schedules (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        instructor_id INTEGER NOT NULL REFERENCES users(id),
        course_code TEXT NOT NULL,
        course_name TEXT NOT NULL,
        day_of_week TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        CHECK (start_time < end_time)
    )";

/// Reservations. `completed` is accepted for rows written by older tools.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        purpose TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'approved', 'rejected', 'cancelled', 'completed')),
        admin_notes TEXT,
        course TEXT,
        year TEXT,
        block TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (start_time < end_time)
    )";

/// In-app notification inbox.
pub const CREATE_NOTIFICATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        reservation_id INTEGER,
        actor_id INTEGER,
        kind TEXT NOT NULL,
        message TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )";

/// Conflict lookups filter reservations by room and date.
pub const CREATE_RESERVATIONS_ROOM_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room_date ON reservations(room_id, date)";

/// History listings filter reservations by owner.
pub const CREATE_RESERVATIONS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// Conflict lookups filter classes by room and weekday.
pub const CREATE_CLASS_SCHEDULES_ROOM_DAY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_class_schedules_room_day ON class_schedules(room_id, day_of_week)";

/// Inbox listings filter by recipient.
pub const CREATE_NOTIFICATIONS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, is_read)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Every table statement, in creation order.
pub const TABLES: &[&str] = &[
    CREATE_METADATA_TABLE,
    CREATE_USERS_TABLE,
    CREATE_ROOMS_TABLE,
    CREATE_CLASS_SCHEDULES_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_NOTIFICATIONS_TABLE,
];

/// Every index statement.
pub const INDICES: &[&str] = &[
    CREATE_RESERVATIONS_ROOM_DATE_INDEX,
    CREATE_RESERVATIONS_USER_INDEX,
    CREATE_CLASS_SCHEDULES_ROOM_DAY_INDEX,
    CREATE_NOTIFICATIONS_USER_INDEX,
];
