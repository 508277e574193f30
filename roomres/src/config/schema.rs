//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered; use the
/// accessor methods for the effective values with defaults applied.
///
/// # Examples
///
/// ```
/// use roomres::config::{Config, NotificationSink, NotificationsConfig};
///
/// let config: Config = serde_yaml::from_str(
///     "maximum_lock_wait_seconds: 10\nnotifications:\n  sink: log\n",
/// )
/// .unwrap();
/// assert_eq!(config.lock_wait().as_secs(), 10);
/// assert_eq!(config.notification_sink(), NotificationSink::Log);
/// assert!(config.require_available_room());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Notification delivery settings.
    pub notifications: Option<NotificationsConfig>,

    /// Booking rules.
    pub booking: Option<BookingConfig>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Default lock wait when none is configured.
    pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

    /// Effective lock wait.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(Self::DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether notifications are sent at all. Defaults to `true`.
    #[must_use]
    pub fn notifications_enabled(&self) -> bool {
        self.notifications
            .as_ref()
            .and_then(|n| n.enabled)
            .unwrap_or(true)
    }

    /// Effective notification sink; [`NotificationSink::None`] when disabled.
    #[must_use]
    pub fn notification_sink(&self) -> NotificationSink {
        if !self.notifications_enabled() {
            return NotificationSink::None;
        }
        self.notifications
            .as_ref()
            .and_then(|n| n.sink)
            .unwrap_or_default()
    }

    /// Whether bookings are refused for rooms flagged unavailable.
    /// Defaults to `true`.
    #[must_use]
    pub fn require_available_room(&self) -> bool {
        self.booking
            .as_ref()
            .and_then(|b| b.require_available_room)
            .unwrap_or(true)
    }

    /// Effective output format. Defaults to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }
}

/// Notification delivery settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Master switch.
    pub enabled: Option<bool>,
    /// Where events go.
    pub sink: Option<NotificationSink>,
}

/// Where notification events are delivered.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSink {
    /// The in-app inbox table.
    #[default]
    Inbox,
    /// Structured log lines.
    Log,
    /// Nowhere.
    None,
}

impl std::fmt::Display for NotificationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbox => write!(f, "inbox"),
            Self::Log => write!(f, "log"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Booking rules.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Refuse new bookings for rooms flagged unavailable.
    pub require_available_room: Option<bool>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use roomres::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lock_wait(), Duration::from_secs(5));
        assert!(config.notifications_enabled());
        assert_eq!(config.notification_sink(), NotificationSink::Inbox);
        assert!(config.require_available_room());
        assert_eq!(config.output_format(), OutputFormat::Table);
    }

    #[test]
    fn test_disabled_notifications_override_sink() {
        let config = Config {
            notifications: Some(NotificationsConfig {
                enabled: Some(false),
                sink: Some(NotificationSink::Log),
            }),
            ..Config::default()
        };
        assert_eq!(config.notification_sink(), NotificationSink::None);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("port_range: 5000\n");
        assert!(result.is_err());

        let result: Result<Config, _> =
            serde_yaml::from_str("booking:\n  earliest_start: '07:00'\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_full_file() {
        let yaml = r"
maximum_lock_wait_seconds: 3
disable_autoinit: true
notifications:
  enabled: true
  sink: none
booking:
  require_available_room: false
output_format: csv
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.maximum_lock_wait_seconds, Some(3));
        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.notification_sink(), NotificationSink::None);
        assert!(!config.require_available_room());
        assert_eq!(config.output_format(), OutputFormat::Csv);
    }
}
