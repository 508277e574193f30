//! Time sources.
//!
//! Booking dates and times are wall-clock values in the department's local
//! time zone; record timestamps are UTC.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// A source of the current time.
pub trait Clock {
    /// The current UTC instant, used for record timestamps.
    fn now_utc(&self) -> DateTime<Utc>;

    /// The current local wall-clock time, compared against booking slots.
    fn now_local(&self) -> NaiveDateTime;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one local time. The UTC instant treats that local
/// time as UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reads `local`.
    #[must_use]
    pub const fn new(local: NaiveDateTime) -> Self {
        Self { local }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.local.and_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.local
    }
}
