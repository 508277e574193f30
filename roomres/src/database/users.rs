//! Account queries.

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::user::{Classification, NewUser, User};

use super::connection::Database;
use super::{parse_column, to_unix};

const SELECT_USER_COLUMNS: &str = "SELECT id, name, email, role, course, year, block FROM users";

const INSERT_USER: &str = r"
    INSERT INTO users (name, email, role, course, year, block, access_token, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_column(row, 3)?,
        classification: Classification {
            course: row.get(4)?,
            year: row.get(5)?,
            block: row.get(6)?,
        },
    })
}

impl Database {
    /// Creates an account and returns it with its freshly issued access
    /// token.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the input is malformed or the e-mail
    /// is already registered.
    pub fn insert_user(conn: &Connection, user: NewUser) -> Result<(User, String)> {
        let user = user.validate()?;
        let token = Uuid::new_v4().simple().to_string();
        conn.execute(
            INSERT_USER,
            params![
                user.name,
                user.email,
                user.role.as_str(),
                user.classification.course,
                user.classification.year,
                user.classification.block,
                token,
                to_unix(Utc::now()),
            ],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Error::Validation {
                field: "email".into(),
                message: format!("{} is already registered", user.email),
            },
            _ => Error::Database(e),
        })?;

        let stored = User {
            id: conn.last_insert_rowid(),
            name: user.name,
            email: user.email,
            role: user.role,
            classification: user.classification,
        };
        Ok((stored, token))
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
        let sql = format!("{SELECT_USER_COLUMNS} WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_user).optional()?)
    }

    /// Looks up an account by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn require_user(conn: &Connection, id: i64) -> Result<User> {
        Self::get_user(conn, id)?.ok_or_else(|| Error::not_found(format!("user {id}")))
    }

    /// Looks up the account holding an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user_by_token(conn: &Connection, token: &str) -> Result<Option<User>> {
        let sql = format!("{SELECT_USER_COLUMNS} WHERE access_token = ?");
        Ok(conn.query_row(&sql, [token], row_to_user).optional()?)
    }

    /// Lists every account ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let sql = format!("{SELECT_USER_COLUMNS} ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(users)
    }

    /// Counts registered accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(conn: &Connection) -> Result<i64> {
        Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }
}
