//! Half-open time intervals and the canonical overlap test.
//!
//! Every conflict decision in the crate goes through [`overlaps`]. Intervals
//! are `[start, end)`: a booking ending at 10:00 and another starting at
//! 10:00 do not overlap.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Storage and display format for times of day.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Storage and display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns `true` when `[existing_start, existing_end)` and
/// `[new_start, new_end)` share at least one instant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use roomres::interval::overlaps;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// assert!(overlaps(t(9), t(11), t(10), t(12)));
/// assert!(!overlaps(t(9), t(10), t(10), t(11)));
/// ```
#[must_use]
pub fn overlaps(
    existing_start: NaiveTime,
    existing_end: NaiveTime,
    new_start: NaiveTime,
    new_end: NaiveTime,
) -> bool {
    existing_start < new_end && existing_end > new_start
}

/// A validated time-of-day interval with `start < end`.
///
/// # Examples
///
/// ```
/// use roomres::TimeRange;
///
/// let morning = TimeRange::parse("09:00", "11:00").unwrap();
/// let late = TimeRange::parse("10:00", "12:00").unwrap();
/// assert!(morning.overlaps(&late));
/// assert_eq!(morning.to_string(), "09:00-11:00");
///
/// assert!(TimeRange::parse("11:00", "09:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

/// Unvalidated wire form of [`TimeRange`].
#[derive(Deserialize)]
struct RawTimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = ValidationError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Creates a range, rejecting empty or inverted intervals.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `end_time` when `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::new(
                "end_time",
                format!(
                    "end time {} must be later than start time {}",
                    end.format("%H:%M"),
                    start.format("%H:%M")
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds with [`parse_time`] and validates them.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either bound is malformed or the range
    /// is empty.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_time("start_time", start)?;
        let end = parse_time("end_time", end)?;
        Self::new(start, end)
    }

    /// Returns the inclusive start of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the exclusive end of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if the two ranges overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parses a time of day as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns a validation error naming `field` if the text is not a time.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::new(field, format!("'{value}' is not a time (HH:MM)")))
}

/// Parses a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns a validation error naming `field` if the text is not a date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ValidationError::new(field, format!("'{value}' is not a date (YYYY-MM-DD)"))
    })
}

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_overlap_partial() {
        assert!(overlaps(t(9, 0), t(11, 0), t(10, 0), t(12, 0)));
        assert!(overlaps(t(10, 0), t(12, 0), t(9, 0), t(11, 0)));
    }

    #[test]
    fn test_overlap_containment() {
        assert!(overlaps(t(8, 0), t(17, 0), t(12, 0), t(13, 0)));
        assert!(overlaps(t(12, 0), t(13, 0), t(8, 0), t(17, 0)));
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        assert!(!overlaps(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
        assert!(!overlaps(t(10, 0), t(11, 0), t(9, 0), t(10, 0)));
    }

    #[test]
    fn test_identical_intervals_overlap() {
        assert!(overlaps(t(9, 0), t(10, 0), t(9, 0), t(10, 0)));
    }

    #[test]
    fn test_time_range_rejects_inverted_and_empty() {
        let err = TimeRange::new(t(11, 0), t(9, 0)).unwrap_err();
        assert_eq!(err.field, "end_time");
        assert!(TimeRange::new(t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("start_time", "09:30").unwrap(), t(9, 30));
        assert_eq!(parse_time("start_time", "09:30:00").unwrap(), t(9, 30));
        assert_eq!(parse_time("start_time", " 14:05 ").unwrap(), t(14, 5));

        let err = parse_time("start_time", "9am").unwrap_err();
        assert_eq!(err.field, "start_time");
        assert!(parse_time("start_time", "25:00").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("date", "2025-03-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(parse_date("date", "10/03/2025").is_err());
        assert!(parse_date("date", "2025-02-30").is_err());
    }

    #[test]
    fn test_time_range_display_and_serde() {
        let range = TimeRange::parse("09:00", "10:30").unwrap();
        assert_eq!(range.to_string(), "09:00-10:30");

        let json = serde_json::to_string(&range).unwrap();
        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let err = serde_json::from_str::<TimeRange>(r#"{"start":"11:00:00","end":"09:00:00"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("end_time"), "{err}");
        assert!(serde_json::from_str::<TimeRange>(r#"{"start":"10:00:00","end":"10:00:00"}"#).is_err());
    }
}
