//! Reservation types.
//!
//! A [`ReservationRequest`] is the validated input of a booking; a
//! [`Reservation`] is the stored record with its lifecycle status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::TimeRange;
use crate::user::Classification;

/// Lifecycle status of a reservation.
///
/// `Completed` is derived from an approved booking whose time has passed and
/// is never written by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
    /// Withdrawn by the owner or an administrator.
    Cancelled,
    /// An approved booking whose end has passed.
    Completed,
}

impl ReservationStatus {
    /// Returns the stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` if a reservation in this status holds its slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomres::ReservationStatus;
    ///
    /// assert!(ReservationStatus::Pending.is_active());
    /// assert!(ReservationStatus::Approved.is_active());
    /// assert!(!ReservationStatus::Cancelled.is_active());
    /// ```
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Returns `true` if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::new(
                "status",
                format!("unknown reservation status '{other}'"),
            )),
        }
    }
}

/// Validated input for a new booking.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roomres::{ReservationRequest, TimeRange};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let slot = TimeRange::parse("09:00", "11:00").unwrap();
///
/// let request = ReservationRequest::builder(10, 42, date, slot)
///     .purpose("Thesis defense rehearsal")
///     .build()
///     .unwrap();
/// assert_eq!(request.purpose(), "Thesis defense rehearsal");
///
/// // Purpose is required
/// assert!(ReservationRequest::builder(10, 42, date, slot).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    room_id: i64,
    requester_id: i64,
    date: NaiveDate,
    time_range: TimeRange,
    purpose: String,
    classification: Classification,
}

impl ReservationRequest {
    /// Starts a request for `room_id` on `date` during `time_range`.
    #[must_use]
    pub fn builder(
        room_id: i64,
        requester_id: i64,
        date: NaiveDate,
        time_range: TimeRange,
    ) -> ReservationRequestBuilder {
        ReservationRequestBuilder {
            room_id,
            requester_id,
            date,
            time_range,
            purpose: String::new(),
            classification: Classification::default(),
        }
    }

    /// Returns the requested room.
    #[must_use]
    pub const fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn requester_id(&self) -> i64 {
        self.requester_id
    }

    /// Returns the booked date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the booked time range.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Returns the stated purpose.
    #[must_use]
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Returns the classification given with the request.
    #[must_use]
    pub const fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Fills unset classification parts from the requester's profile.
    #[must_use]
    pub fn with_default_classification(mut self, profile: &Classification) -> Self {
        self.classification = self.classification.or(profile);
        self
    }

    /// Turns the request into a freshly stored pending reservation.
    #[must_use]
    pub fn into_pending(self, id: i64, at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            room_id: self.room_id,
            requester_id: self.requester_id,
            date: self.date,
            time_range: self.time_range,
            purpose: self.purpose,
            status: ReservationStatus::Pending,
            admin_notes: None,
            classification: self.classification,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Builder for [`ReservationRequest`].
#[derive(Debug)]
pub struct ReservationRequestBuilder {
    room_id: i64,
    requester_id: i64,
    date: NaiveDate,
    time_range: TimeRange,
    purpose: String,
    classification: Classification,
}

impl ReservationRequestBuilder {
    /// Sets the purpose. Leading and trailing whitespace is trimmed.
    #[must_use]
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into().trim().to_string();
        self
    }

    /// Sets the course/year/block classification.
    #[must_use]
    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the purpose is empty.
    pub fn build(self) -> Result<ReservationRequest, ValidationError> {
        if self.purpose.is_empty() {
            return Err(ValidationError::new("purpose", "purpose must not be empty"));
        }
        Ok(ReservationRequest {
            room_id: self.room_id,
            requester_id: self.requester_id,
            date: self.date,
            time_range: self.time_range,
            purpose: self.purpose,
            classification: self.classification.normalized(),
        })
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub(crate) id: i64,
    pub(crate) room_id: i64,
    pub(crate) requester_id: i64,
    pub(crate) date: NaiveDate,
    pub(crate) time_range: TimeRange,
    pub(crate) purpose: String,
    pub(crate) status: ReservationStatus,
    pub(crate) admin_notes: Option<String>,
    pub(crate) classification: Classification,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Returns the row id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn requester_id(&self) -> i64 {
        self.requester_id
    }

    /// Returns the booked date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the booked time range.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Returns the stated purpose.
    #[must_use]
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the notes left by an administrator.
    #[must_use]
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    /// Returns the course/year/block classification.
    #[must_use]
    pub const fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Returns when the request was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the status last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the local date-time at which the booking ends.
    #[must_use]
    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time_range.end())
    }

    /// Returns `true` once `now` is strictly after the booking's end.
    #[must_use]
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        now > self.ends_at()
    }

    /// Returns the status as users see it at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use roomres::{ReservationRequest, ReservationStatus, TimeRange};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let slot = TimeRange::parse("09:00", "11:00").unwrap();
    /// let pending = ReservationRequest::builder(1, 1, date, slot)
    ///     .purpose("Review")
    ///     .build()
    ///     .unwrap()
    ///     .into_pending(1, Utc::now());
    ///
    /// let later = date.succ_opt().unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// // Only approved bookings complete; a lapsed request stays pending.
    /// assert_eq!(pending.effective_status(later), ReservationStatus::Pending);
    /// ```
    #[must_use]
    pub fn effective_status(&self, now: NaiveDateTime) -> ReservationStatus {
        if self.status == ReservationStatus::Approved && self.is_past(now) {
            ReservationStatus::Completed
        } else {
            self.status
        }
    }

    /// Returns a copy moved to `status`, keeping existing notes when none
    /// are given.
    #[must_use]
    pub fn with_status(
        &self,
        status: ReservationStatus,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            status,
            admin_notes: notes.or_else(|| self.admin_notes.clone()),
            updated_at: at,
            ..self.clone()
        }
    }
}
