//! Inbox queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::Result;
use crate::notify::{NotificationEvent, NotificationKind};

use super::connection::Database;
use super::{from_unix, parse_column, to_unix};

const INSERT_NOTIFICATION: &str = r"
    INSERT INTO notifications (user_id, reservation_id, actor_id, kind, message, is_read, created_at)
    VALUES (?, ?, ?, ?, ?, 0, ?)
";

const SELECT_NOTIFICATIONS: &str = r"
    SELECT id, user_id, reservation_id, actor_id, kind, message, is_read, created_at
    FROM notifications
    WHERE user_id = ?1 AND (?2 = 0 OR is_read = 0)
    ORDER BY created_at DESC, id DESC
";

const MARK_READ: &str = r"
    UPDATE notifications SET is_read = 1
    WHERE user_id = ?1 AND (?2 IS NULL OR id = ?2) AND is_read = 0
";

/// A notification as stored in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredNotification {
    /// Row id.
    pub id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Reservation concerned, if any.
    pub reservation_id: Option<i64>,
    /// Who caused it, when attributed.
    pub actor_id: Option<i64>,
    /// What happened.
    pub kind: NotificationKind,
    /// Rendered text.
    pub message: String,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// When it was stored.
    pub created_at: DateTime<Utc>,
}

fn row_to_notification(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredNotification> {
    Ok(StoredNotification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        reservation_id: row.get(2)?,
        actor_id: row.get(3)?,
        kind: parse_column(row, 4)?,
        message: row.get(5)?,
        is_read: row.get(6)?,
        created_at: from_unix(row, 7)?,
    })
}

impl Database {
    /// Stores `event` in its owner's inbox. Returns the new row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        conn: &Connection,
        event: &NotificationEvent,
        message: &str,
        at: DateTime<Utc>,
    ) -> Result<i64> {
        conn.execute(
            INSERT_NOTIFICATION,
            params![
                event.owner_id,
                event.reservation_id,
                event.actor_id,
                event.kind.as_str(),
                message,
                to_unix(at),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_notifications(
        conn: &Connection,
        user_id: i64,
        unread_only: bool,
    ) -> Result<Vec<StoredNotification>> {
        let mut stmt = conn.prepare(SELECT_NOTIFICATIONS)?;
        let notifications = stmt
            .query_map(params![user_id, unread_only], row_to_notification)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(notifications)
    }

    /// Marks one notification, or all of them when `id` is `None`, as read.
    /// Only the recipient's own rows are touched. Returns the number changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_notifications_read(conn: &Connection, user_id: i64, id: Option<i64>) -> Result<usize> {
        Ok(conn.execute(MARK_READ, params![user_id, id])?)
    }
}
