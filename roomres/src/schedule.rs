//! Recurring weekly class schedules.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::TimeRange;

/// Returns the stored lowercase name of a weekday.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parses a weekday from its full or abbreviated English name.
///
/// # Errors
///
/// Returns a validation error on `day_of_week` for anything else.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use roomres::schedule::parse_weekday;
///
/// assert_eq!(parse_weekday("Monday").unwrap(), Weekday::Mon);
/// assert_eq!(parse_weekday("thu").unwrap(), Weekday::Thu);
/// assert!(parse_weekday("someday").is_err());
/// ```
pub fn parse_weekday(value: &str) -> Result<Weekday, ValidationError> {
    value.trim().parse::<Weekday>().map_err(|_| {
        ValidationError::new("day_of_week", format!("'{value}' is not a day of the week"))
    })
}

/// A fixed weekly class occupying a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    /// Row id.
    pub id: i64,
    /// Room the class meets in.
    pub room_id: i64,
    /// Teaching user.
    pub instructor_id: i64,
    /// Course code, e.g. `CS101`.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Day the class meets.
    pub day_of_week: Weekday,
    /// Meeting time.
    pub time_range: TimeRange,
}

impl ClassSchedule {
    /// Returns `course_code course_name`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.course_code, self.course_name)
    }
}

/// Input for adding a class to the weekly timetable.
#[derive(Debug, Clone)]
pub struct NewClassSchedule {
    /// Room the class meets in.
    pub room_id: i64,
    /// Teaching user.
    pub instructor_id: i64,
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Day the class meets.
    pub day_of_week: Weekday,
    /// Meeting time.
    pub time_range: TimeRange,
}

impl NewClassSchedule {
    /// Trims and checks the text fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty course code or name.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let course_code = self.course_code.trim().to_uppercase();
        if course_code.is_empty() {
            return Err(ValidationError::new(
                "course_code",
                "course code must not be empty",
            ));
        }
        let course_name = self.course_name.trim().to_string();
        if course_name.is_empty() {
            return Err(ValidationError::new(
                "course_name",
                "course name must not be empty",
            ));
        }
        Ok(Self {
            course_code,
            course_name,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_names_roundtrip_through_parse() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(parse_weekday(weekday_name(day)).unwrap(), day);
        }
    }

    #[test]
    fn test_validate_uppercases_code() {
        let class = NewClassSchedule {
            room_id: 1,
            instructor_id: 2,
            course_code: " cs101 ".into(),
            course_name: "Intro to Computing".into(),
            day_of_week: Weekday::Mon,
            time_range: TimeRange::parse("10:00", "12:00").unwrap(),
        }
        .validate()
        .unwrap();
        assert_eq!(class.course_code, "CS101");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = NewClassSchedule {
            room_id: 1,
            instructor_id: 2,
            course_code: "CS101".into(),
            course_name: "  ".into(),
            day_of_week: Weekday::Mon,
            time_range: TimeRange::parse("10:00", "12:00").unwrap(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "course_name");
    }
}
