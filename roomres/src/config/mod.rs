//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config (`<data dir>/config.yaml`)
//! 3. Project config (nearest `roomres.yaml` at or above the working directory)
//! 4. Environment variables (`ROOMRES_*`)
//! 5. Programmatic overrides (via [`ConfigBuilder::with_config`])
//!
//! # Examples
//!
//! ```
//! use roomres::config::{Config, ConfigBuilder, OutputFormat};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         output_format: Some(OutputFormat::Json),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_format(), OutputFormat::Json);
//! assert!(config.require_available_room());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{BookingConfig, Config, NotificationSink, NotificationsConfig, OutputFormat};
pub use validator::ConfigValidator;
