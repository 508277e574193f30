//! Notification events and the sinks that receive them.
//!
//! Operations collect [`NotificationEvent`]s while they run and hand them
//! to a [`Dispatcher`] only after their transaction commits. A failing sink
//! is logged and otherwise ignored; it never undoes the committed change.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{Database, DatabaseConfig};
use crate::error::ValidationError;

/// What happened to a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A request was submitted.
    Created,
    /// An administrator approved the request.
    Approved,
    /// An administrator rejected the request.
    Rejected,
    /// The reservation was withdrawn.
    Cancelled,
    /// The reserved room's availability flag changed.
    RoomAvailability,
}

impl NotificationKind {
    /// Returns the stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::RoomAvailability => "room_availability",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "room_availability" => Ok(Self::RoomAvailability),
            other => Err(ValidationError::new(
                "kind",
                format!("unknown notification kind '{other}'"),
            )),
        }
    }
}

/// A fire-and-forget message about one reservation, addressed to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// What happened.
    pub kind: NotificationKind,
    /// The reservation concerned.
    pub reservation_id: i64,
    /// The reservation's owner, who receives the notification.
    pub owner_id: i64,
    /// Who caused it, when attributed.
    pub actor_id: Option<i64>,
    /// Extra text such as administrator notes.
    pub detail: Option<String>,
}

impl NotificationEvent {
    /// Creates an event without attribution or detail.
    #[must_use]
    pub const fn new(kind: NotificationKind, reservation_id: i64, owner_id: i64) -> Self {
        Self {
            kind,
            reservation_id,
            owner_id,
            actor_id: None,
            detail: None,
        }
    }

    /// Attributes the event to `actor_id`.
    #[must_use]
    pub const fn by(mut self, actor_id: Option<i64>) -> Self {
        self.actor_id = actor_id;
        self
    }

    /// Attaches extra text.
    #[must_use]
    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }

    /// Renders the text shown to the recipient.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomres::{NotificationEvent, NotificationKind};
    ///
    /// let event = NotificationEvent::new(NotificationKind::Rejected, 7, 3)
    ///     .with_detail(Some("Room under maintenance".into()));
    /// assert_eq!(
    ///     event.message(),
    ///     "Your reservation #7 was rejected: Room under maintenance"
    /// );
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        let id = self.reservation_id;
        let base = match self.kind {
            NotificationKind::Created => format!("Your reservation #{id} was submitted for approval"),
            NotificationKind::Approved => format!("Your reservation #{id} was approved"),
            NotificationKind::Rejected => format!("Your reservation #{id} was rejected"),
            NotificationKind::Cancelled => format!("Your reservation #{id} was cancelled"),
            NotificationKind::RoomAvailability => {
                format!("The room for your reservation #{id} changed availability")
            }
        };
        match &self.detail {
            Some(detail) => format!("{base}: {detail}"),
            None => base,
        }
    }
}

/// Failure inside a notification sink. Never returned from operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The inbox could not be written.
    #[error("failed to store notification: {0}")]
    Store(#[from] crate::error::Error),

    /// The sink rejected the event.
    #[error("notification sink unavailable: {0}")]
    Unavailable(String),
}

/// A destination for notification events.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink could not accept the event.
    fn emit(&self, event: &NotificationEvent) -> Result<(), NotifyError>;
}

/// Writes each event as a structured log line.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn emit(&self, event: &NotificationEvent) -> Result<(), NotifyError> {
        log::info!(
            "notification kind={} reservation={} owner={} actor={}",
            event.kind,
            event.reservation_id,
            event.owner_id,
            event
                .actor_id
                .map_or_else(|| "-".to_string(), |id| id.to_string())
        );
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn emit(&self, _event: &NotificationEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Stores events in the owner's in-app inbox.
///
/// Holds its own connection so inbox writes commit independently of the
/// operation that produced them.
#[derive(Debug)]
pub struct InboxNotifier {
    db: Database,
}

impl InboxNotifier {
    /// Opens a dedicated connection to the database at `config.path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> crate::error::Result<Self> {
        Ok(Self {
            db: Database::open(config)?,
        })
    }
}

impl Notifier for InboxNotifier {
    fn emit(&self, event: &NotificationEvent) -> Result<(), NotifyError> {
        Database::insert_notification(self.db.connection(), event, &event.message(), Utc::now())?;
        Ok(())
    }
}

/// Sends committed events to a sink, logging and swallowing failures.
pub struct Dispatcher {
    sink: Box<dyn Notifier>,
}

impl Dispatcher {
    /// Creates a dispatcher over `sink`.
    #[must_use]
    pub fn new(sink: Box<dyn Notifier>) -> Self {
        Self { sink }
    }

    /// Creates a dispatcher that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Box::new(NullNotifier))
    }

    /// Emits each event in order. Returns how many were delivered.
    pub fn dispatch(&self, events: &[NotificationEvent]) -> usize {
        let mut delivered = 0;
        for event in events {
            match self.sink.emit(event) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!(
                    "dropping {} notification for reservation {}: {e}",
                    event.kind,
                    event.reservation_id
                ),
            }
        }
        delivered
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
