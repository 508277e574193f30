//! Utility functions for CLI operations.
//!
//! Configuration loading, database and service setup, caller
//! authentication, and argument parsing shared by the commands.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use roomres::database::{default_data_dir, DATABASE_FILE};
use roomres::interval::{parse_date, parse_time};
use roomres::{
    Actor, BookingService, Config, ConfigBuilder, Database, DatabaseConfig, IdentityProvider,
    TokenDirectory,
};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Access token identifying the caller.
    pub token: Option<String>,
}

/// Resolve the data directory: `--data-dir`, then `~/.roomres`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Project `roomres.yaml`
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));
    let mut db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);
    if global.disable_autoinit || config.disable_autoinit == Some(true) {
        db_config = db_config.without_auto_create();
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Load configuration, open the database, and wrap both in a service.
pub fn open_service(global: &GlobalOptions) -> Result<BookingService, CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    BookingService::new(db, config).map_err(CliError::from)
}

/// Resolve `--token` to the acting user.
pub fn current_actor(global: &GlobalOptions, service: &BookingService) -> Result<Actor, CliError> {
    let token = global.token.as_deref().ok_or(CliError::Authentication)?;
    let directory = TokenDirectory::open(&service.database().config().path)?;
    let actor = directory.actor(token)?;
    log::debug!("authenticated as user {} ({})", actor.user_id, actor.role);
    Ok(actor)
}

/// Like [`current_actor`], but `None` when no token was given.
pub fn optional_actor(
    global: &GlobalOptions,
    service: &BookingService,
) -> Result<Option<Actor>, CliError> {
    if global.token.is_none() {
        return Ok(None);
    }
    current_actor(global, service).map(Some)
}

/// Clap value parser for `YYYY-MM-DD` dates.
pub fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date("date", value).map_err(|e| e.message)
}

/// Clap value parser for `HH:MM` or `HH:MM:SS` times.
pub fn time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time("time", value).map_err(|e| e.message)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Print plan warnings to stderr unless `--quiet`.
pub fn print_warnings(global: &GlobalOptions, warnings: &[String]) {
    if global.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2025-03-10 09:30:00");
    }

    #[test]
    fn test_date_and_time_args() {
        assert_eq!(
            date_arg("2025-03-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert!(date_arg("10/03/2025").is_err());
        assert_eq!(time_arg("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert!(time_arg("9am").is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let global = GlobalOptions {
            data_dir: Some(PathBuf::from("/srv/roomres")),
            ..GlobalOptions::default()
        };
        assert_eq!(resolve_data_dir(&global).unwrap(), PathBuf::from("/srv/roomres"));
    }

    #[test]
    fn test_missing_token_is_authentication_error() {
        let temp = tempfile::tempdir().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().to_path_buf()),
            ..GlobalOptions::default()
        };
        let service = open_service(&global).unwrap();
        assert!(matches!(
            current_actor(&global, &service),
            Err(CliError::Authentication)
        ));
        assert!(optional_actor(&global, &service).unwrap().is_none());
    }
}
