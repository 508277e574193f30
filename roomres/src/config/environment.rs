//! Environment variable handling for configuration overrides.
//!
//! `ROOMRES_*` variables override values from configuration files.

use std::env;

use crate::config::schema::{Config, NotificationSink, OutputFormat};
use crate::error::{Error, Result};

/// Lock wait override, in seconds.
pub const LOCK_WAIT_ENV: &str = "ROOMRES_MAXIMUM_LOCK_WAIT_SECONDS";
/// Notification master switch.
pub const NOTIFICATIONS_ENABLED_ENV: &str = "ROOMRES_NOTIFICATIONS_ENABLED";
/// Notification sink (`inbox`, `log`, `none`).
pub const NOTIFICATION_SINK_ENV: &str = "ROOMRES_NOTIFICATION_SINK";
/// Refuse bookings on unavailable rooms.
pub const REQUIRE_AVAILABLE_ROOM_ENV: &str = "ROOMRES_REQUIRE_AVAILABLE_ROOM";
/// Output format for list commands.
pub const OUTPUT_FORMAT_ENV: &str = "ROOMRES_OUTPUT_FORMAT";
/// Disable automatic database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "ROOMRES_DISABLE_AUTOINIT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roomres::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `ROOMRES_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable when a value cannot
    /// be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a non-negative integer".into(),
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(NOTIFICATIONS_ENABLED_ENV) {
            let enabled = Self::parse_bool(NOTIFICATIONS_ENABLED_ENV, &val)?;
            config
                .notifications
                .get_or_insert_with(Default::default)
                .enabled = Some(enabled);
        }

        if let Ok(val) = env::var(NOTIFICATION_SINK_ENV) {
            let sink = Self::parse_sink(&val)?;
            config.notifications.get_or_insert_with(Default::default).sink = Some(sink);
        }

        if let Ok(val) = env::var(REQUIRE_AVAILABLE_ROOM_ENV) {
            let required = Self::parse_bool(REQUIRE_AVAILABLE_ROOM_ENV, &val)?;
            config
                .booking
                .get_or_insert_with(Default::default)
                .require_available_room = Some(required);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_output_format(&val)?);
        }

        Ok(())
    }

    fn parse_bool(var: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: var.into(),
                message: format!("Invalid boolean value: {value}"),
            }),
        }
    }

    fn parse_sink(value: &str) -> Result<NotificationSink> {
        match value.trim().to_lowercase().as_str() {
            "inbox" => Ok(NotificationSink::Inbox),
            "log" => Ok(NotificationSink::Log),
            "none" | "off" => Ok(NotificationSink::None),
            _ => Err(Error::Validation {
                field: NOTIFICATION_SINK_ENV.into(),
                message: format!("Unknown sink '{value}' (expected inbox, log or none)"),
            }),
        }
    }

    fn parse_output_format(value: &str) -> Result<OutputFormat> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "table" => Ok(OutputFormat::Table),
            _ => Err(Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Unknown output format '{value}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in self.0 {
                env::remove_var(var);
            }
        }
    }

    const ALL: &[&str] = &[
        LOCK_WAIT_ENV,
        NOTIFICATIONS_ENABLED_ENV,
        NOTIFICATION_SINK_ENV,
        REQUIRE_AVAILABLE_ROOM_ENV,
        OUTPUT_FORMAT_ENV,
        DISABLE_AUTOINIT_ENV,
    ];

    #[test]
    fn test_parse_bool_variants() {
        for v in ["true", "1", "YES", " on "] {
            assert!(EnvironmentConfig::parse_bool("X", v).unwrap());
        }
        for v in ["false", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("X", v).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("X", "maybe").is_err());
    }

    #[test]
    #[serial]
    fn test_overrides_apply() {
        let _guard = EnvGuard(ALL);
        env::set_var(LOCK_WAIT_ENV, "12");
        env::set_var(NOTIFICATION_SINK_ENV, "log");
        env::set_var(REQUIRE_AVAILABLE_ROOM_ENV, "no");
        env::set_var(OUTPUT_FORMAT_ENV, "JSON");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();

        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
        assert_eq!(config.notification_sink(), NotificationSink::Log);
        assert!(!config.require_available_room());
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    #[serial]
    fn test_invalid_value_names_variable() {
        let _guard = EnvGuard(ALL);
        env::set_var(LOCK_WAIT_ENV, "soon");

        let err = EnvironmentConfig::apply_overrides(&mut Config::default()).unwrap_err();
        assert!(err.to_string().contains(LOCK_WAIT_ENV));
    }

    #[test]
    #[serial]
    fn test_disabling_keeps_configured_sink() {
        let _guard = EnvGuard(ALL);
        env::set_var(NOTIFICATIONS_ENABLED_ENV, "off");

        let mut config = Config {
            notifications: Some(crate::config::NotificationsConfig {
                enabled: None,
                sink: Some(NotificationSink::Log),
            }),
            ..Config::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.notification_sink(), NotificationSink::None);
        assert_eq!(
            config.notifications.unwrap().sink,
            Some(NotificationSink::Log)
        );
    }
}
