//! Shared fixtures for integration tests.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tempfile::TempDir;

use roomres::config::{Config, NotificationSink, NotificationsConfig};
use roomres::{
    BookingService, Clock, Database, DatabaseConfig, NewRoom, NewUser, ReservationRequest, Role,
    Room, RoomType, TimeRange, User,
};

/// 2025-03-10, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// A clock the test can move.
#[derive(Clone)]
pub struct TestClock(Rc<Cell<NaiveDateTime>>);

impl TestClock {
    pub fn at(local: NaiveDateTime) -> Self {
        Self(Rc::new(Cell::new(local)))
    }

    #[allow(dead_code)]
    pub fn set(&self, local: NaiveDateTime) {
        self.0.set(local);
    }
}

impl Clock for TestClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0.get().and_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.0.get()
    }
}

/// A data directory with an open service and three accounts.
#[allow(dead_code)]
pub struct TestEnv {
    pub dir: TempDir,
    pub service: BookingService,
    pub clock: TestClock,
    pub admin: User,
    pub student: User,
    pub instructor: User,
}

#[allow(dead_code)]
impl TestEnv {
    /// Opens a fresh database with inbox notifications and the clock at
    /// 07:00 on [`monday`].
    pub fn new() -> Self {
        Self::with_config(Config {
            notifications: Some(NotificationsConfig {
                enabled: Some(true),
                sink: Some(NotificationSink::Inbox),
            }),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(Self::db_config_in(&dir)).unwrap();
        let clock = TestClock::at(monday().and_hms_opt(7, 0, 0).unwrap());
        let mut service = BookingService::new(db, config)
            .unwrap()
            .with_clock(clock.clone());

        let (admin, _) = service
            .add_user(None, NewUser::new("Registrar", "registrar@example.edu", Role::Admin))
            .unwrap();
        let (student, _) = service
            .add_user(
                Some(admin.actor()),
                NewUser::new("Ada Lovelace", "ada@example.edu", Role::Student),
            )
            .unwrap();
        let (instructor, _) = service
            .add_user(
                Some(admin.actor()),
                NewUser::new("Grace Hopper", "grace@example.edu", Role::Instructor),
            )
            .unwrap();

        Self {
            dir,
            service,
            clock,
            admin,
            student,
            instructor,
        }
    }

    fn db_config_in(dir: &TempDir) -> DatabaseConfig {
        DatabaseConfig::new(dir.path().join("roomres.db"))
    }

    /// Config for another connection to the same file.
    pub fn db_config(&self) -> DatabaseConfig {
        Self::db_config_in(&self.dir)
    }

    /// Adds a classroom in the Main building.
    pub fn room(&mut self, number: &str) -> Room {
        let admin = self.admin.actor();
        self.service
            .add_room(
                admin,
                NewRoom {
                    room_number: number.to_string(),
                    building: "Main".to_string(),
                    capacity: 40,
                    room_type: RoomType::Classroom,
                    equipment: None,
                },
            )
            .unwrap()
    }

    /// Adds another student.
    pub fn another_student(&mut self, name: &str) -> User {
        let email = format!("{}@example.edu", name.to_lowercase());
        let admin = self.admin.actor();
        self.service
            .add_user(Some(admin), NewUser::new(name, email, Role::Student))
            .unwrap()
            .0
    }
}

/// A request on `date` between `start` and `end`.
#[allow(dead_code)]
pub fn request_on(
    room_id: i64,
    requester_id: i64,
    date: NaiveDate,
    start: &str,
    end: &str,
    purpose: &str,
) -> ReservationRequest {
    ReservationRequest::builder(room_id, requester_id, date, TimeRange::parse(start, end).unwrap())
        .purpose(purpose)
        .build()
        .unwrap()
}
