//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, Config, NotificationsConfig};

/// Merges configuration layers; later layers win field by field.
///
/// # Examples
///
/// ```
/// use roomres::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(1), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(1));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Overlays `source` onto `target`. Nested sections merge per field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref incoming) = source.notifications {
            let merged = target.notifications.get_or_insert_with(NotificationsConfig::default);
            if incoming.enabled.is_some() {
                merged.enabled = incoming.enabled;
            }
            if incoming.sink.is_some() {
                merged.sink = incoming.sink;
            }
        }

        if let Some(ref incoming) = source.booking {
            let merged = target.booking.get_or_insert_with(BookingConfig::default);
            if incoming.require_available_room.is_some() {
                merged.require_available_room = incoming.require_available_room;
            }
        }
    }
}
