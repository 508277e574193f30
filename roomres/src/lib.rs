#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roomres
//!
//! A library for department room reservations: requests, conflict
//! detection against bookings and the weekly class timetable, an approval
//! workflow, and history retention.
//!
//! ## Core Types
//!
//! - [`TimeRange`] and [`interval::overlaps`]: half-open time intervals
//! - [`conflict::check_conflicts`] and [`Conflict`]: what occupies a slot
//! - [`lifecycle::authorize_transition`]: who may move a reservation where
//! - [`retention::can_delete`]: which records may leave a user's history
//! - [`operations::BookingService`]: transactional entry points
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use roomres::TimeRange;
//!
//! let morning = TimeRange::parse("09:00", "11:00").unwrap();
//! let late = TimeRange::parse("11:00", "12:00").unwrap();
//! let overlap = TimeRange::parse("10:30", "11:30").unwrap();
//!
//! // Back-to-back bookings do not collide
//! assert!(!morning.overlaps(&late));
//! assert!(morning.overlaps(&overlap));
//!
//! // Zero-length and inverted ranges are rejected
//! assert!(TimeRange::parse("10:00", "10:00").is_err());
//! ```

pub mod clock;
pub mod config;
pub mod conflict;
pub mod database;
pub mod error;
pub mod identity;
pub mod interval;
pub mod lifecycle;
pub mod logging;
pub mod notify;
pub mod operations;
pub mod reservation;
pub mod retention;
pub mod room;
pub mod schedule;
pub mod user;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use conflict::{Conflict, ConflictKind};
pub use database::{Database, DatabaseConfig, ReservationFilter};
pub use error::{Error, Result, ValidationError};
pub use identity::{IdentityProvider, TokenDirectory};
pub use interval::TimeRange;
pub use logging::{init_logger, LogLevel, Logger};
pub use notify::{Dispatcher, NotificationEvent, NotificationKind, Notifier};
pub use operations::{BookingService, ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use reservation::{Reservation, ReservationRequest, ReservationStatus};
pub use retention::{DenialReason, RetentionDecision};
pub use room::{NewRoom, Room, RoomType};
pub use schedule::{ClassSchedule, NewClassSchedule};
pub use user::{Actor, Classification, NewUser, Role, User};
