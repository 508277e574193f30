//! Booking operations using the plan-execute pattern.
//!
//! Operations are split into two phases that share one write transaction:
//! 1. **Planning** checks authorization and booking rules and lists the
//!    writes to make.
//! 2. **Execution** applies the writes and collects notification events,
//!    which are dispatched after commit.
//!
//! [`BookingService`] wires both phases together for callers.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, Utc};
//! use roomres::operations::{PlanExecutor, ReserveOptions, ReservePlan};
//! use roomres::{Config, Database, DatabaseConfig, ReservationRequest, TimeRange};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/roomres.db")).unwrap();
//! let config = Config::default();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let request = ReservationRequest::builder(1, 2, date, TimeRange::parse("09:00", "11:00").unwrap())
//!     .purpose("Study group")
//!     .build()
//!     .unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! let plan = ReservePlan::new(ReserveOptions::new(request), &config)
//!     .build_plan(&tx)
//!     .unwrap();
//! let result = PlanExecutor::new(&tx, Utc::now()).execute(&plan).unwrap();
//! tx.commit().unwrap();
//! ```

pub mod availability;
pub mod executor;
pub mod history;
pub mod init;
pub mod plan;
pub mod reserve;
pub mod service;
pub mod transition;

pub use availability::{AvailabilityOptions, AvailabilityPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use history::{DeleteOptions, DeletePlan};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use reserve::{ReserveOptions, ReservePlan};
pub use service::BookingService;
pub use transition::{TransitionOptions, TransitionPlan};
