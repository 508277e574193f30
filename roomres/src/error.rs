//! Error types for the roomres library.
//!
//! This module provides the error hierarchy shared by every operation in the
//! library, using `thiserror` for ergonomic error handling. Business-rule
//! failures (validation, conflict, authorization, state) are terminal and are
//! returned to the caller as-is; infrastructure failures are surfaced without
//! retry.

use std::path::PathBuf;

use thiserror::Error;

use crate::conflict::Conflict;
use crate::reservation::ReservationStatus;

/// Result type alias for operations that may fail with a roomres error.
///
/// # Examples
///
/// ```
/// use roomres::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roomres library.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or malformed.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The candidate interval overlaps existing reservations or classes.
    #[error("reservation conflict: {}", describe_conflicts(.conflicts))]
    ReservationConflict {
        /// Every conflict found, reservations first then classes.
        conflicts: Vec<Conflict>,
    },

    /// The actor is not permitted to perform the action.
    #[error("not authorized to {action}")]
    Unauthorized {
        /// What was attempted, phrased without details about other users.
        action: String,
    },

    /// The requested status is not reachable from the current status.
    #[error("cannot move reservation from {current} to {requested}")]
    InvalidTransition {
        /// Status the reservation is currently in.
        current: ReservationStatus,
        /// Status that was requested.
        requested: ReservationStatus,
    },

    /// The retention policy refused to delete a history record.
    #[error("cannot delete reservation: {reason}")]
    DeletionDenied {
        /// Human-readable reason for the refusal.
        reason: String,
    },

    /// The referenced room, reservation, schedule or user does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The supplied credential did not identify a user.
    #[error("authentication failed: unknown or missing credential")]
    Authentication,

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_conflicts(conflicts: &[Conflict]) -> String {
    match conflicts {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        many => format!(
            "{} overlapping bookings: {}",
            many.len(),
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

/// Error type for field-level validation failures.
///
/// Domain constructors return this lightweight type; it converts into
/// [`Error::Validation`] with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Builds a not-found error for a named resource.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Builds an authorization error for an action.
    #[must_use]
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    /// Check if the error is a business-rule rejection rather than an
    /// infrastructure failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomres::Error;
    ///
    /// assert!(Error::unauthorized("approve reservations").is_business_rule());
    /// assert!(!Error::LockTimeout { seconds: 5 }.is_business_rule());
    /// ```
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ReservationConflict { .. }
                | Self::Unauthorized { .. }
                | Self::InvalidTransition { .. }
                | Self::DeletionDenied { .. }
                | Self::NotFound { .. }
        )
    }

    /// Returns the conflict list when this is a conflict error.
    #[must_use]
    pub fn conflicts(&self) -> Option<&[Conflict]> {
        match self {
            Self::ReservationConflict { conflicts } => Some(conflicts),
            _ => None,
        }
    }
}
