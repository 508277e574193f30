//! The booking service: one entry point per operation.
//!
//! Every write runs in its own immediate transaction. Notification events
//! produced by a plan are dispatched only after that transaction commits.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, NotificationSink};
use crate::conflict::{check_conflicts, find_conflicts, ClassSlot, Conflict};
use crate::database::{Database, ReservationFilter, StoredNotification};
use crate::error::{Error, Result};
use crate::interval::TimeRange;
use crate::notify::{Dispatcher, InboxNotifier, LogNotifier};
use crate::reservation::{Reservation, ReservationRequest, ReservationStatus};
use crate::retention::RetentionDecision;
use crate::room::{NewRoom, Room};
use crate::schedule::{ClassSchedule, NewClassSchedule};
use crate::user::{Actor, NewUser, Role, User};

use super::availability::{AvailabilityOptions, AvailabilityPlan};
use super::executor::{ExecutionResult, PlanExecutor};
use super::history::{DeleteOptions, DeletePlan};
use super::plan::OperationPlan;
use super::reserve::{ReserveOptions, ReservePlan};
use super::transition::{TransitionOptions, TransitionPlan};

/// Runs booking operations against one database.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use roomres::operations::BookingService;
/// use roomres::{Config, Database, DatabaseConfig, ReservationRequest, TimeRange};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roomres.db")).unwrap();
/// let mut service = BookingService::new(db, Config::default()).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let request = ReservationRequest::builder(1, 2, date, TimeRange::parse("09:00", "11:00").unwrap())
///     .purpose("Study group")
///     .build()
///     .unwrap();
/// let reservation = service.create_reservation(request).unwrap();
/// println!("created #{}", reservation.id());
/// ```
pub struct BookingService {
    db: Database,
    config: Config,
    dispatcher: Dispatcher,
    clock: Box<dyn Clock>,
}

impl BookingService {
    /// Creates a service using the notification sink named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inbox sink cannot open its own connection.
    pub fn new(db: Database, config: Config) -> Result<Self> {
        let dispatcher = match config.notification_sink() {
            NotificationSink::Inbox => {
                Dispatcher::new(Box::new(InboxNotifier::open(db.config().clone())?))
            }
            NotificationSink::Log => Dispatcher::new(Box::new(LogNotifier)),
            NotificationSink::None => Dispatcher::disabled(),
        };
        Ok(Self {
            db,
            config,
            dispatcher,
            clock: Box::new(SystemClock),
        })
    }

    /// Replaces the notification dispatcher.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Current local wall-clock time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now_local()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Builds a plan inside a write transaction, executes it, commits, and
    /// dispatches the resulting events. A dry run rolls back instead.
    fn run<F>(&mut self, dry_run: bool, build: F) -> Result<ExecutionResult>
    where
        F: FnOnce(&Connection, &Config) -> Result<OperationPlan>,
    {
        let at = self.clock.now_utc();
        let tx = self.db.begin_transaction()?;
        let plan = build(&tx, &self.config)?;
        log::debug!("plan: {} ({} action(s))", plan.description, plan.len());

        let executor = PlanExecutor::new(&tx, at);
        let executor = if dry_run { executor.dry_run() } else { executor };
        let result = executor.execute(&plan)?;
        if dry_run {
            return Ok(result);
        }
        tx.commit()?;

        self.dispatcher.dispatch(&result.events);
        Ok(result)
    }

    /// Lists everything overlapping the candidate slot, reservations first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room.
    pub fn check_conflicts(
        &self,
        room_id: i64,
        date: NaiveDate,
        range: &TimeRange,
    ) -> Result<Vec<Conflict>> {
        let conn = self.db.connection();
        Database::require_room(conn, room_id)?;
        check_conflicts(conn, room_id, date, range)
    }

    /// Plans and, unless `dry_run`, stores a reservation request.
    ///
    /// # Errors
    ///
    /// See [`ReservePlan::build_plan`]; also [`Error::LockTimeout`] when the
    /// write lock cannot be taken.
    pub fn reserve(&mut self, options: ReserveOptions, dry_run: bool) -> Result<ExecutionResult> {
        let options = match options.now {
            Some(_) => options,
            None => {
                let now = self.now();
                options.with_now(Some(now))
            }
        };
        self.run(dry_run, |conn, config| {
            ReservePlan::new(options, config).build_plan(conn)
        })
    }

    /// Stores a pending reservation for its requester.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] listing every overlap, or the
    /// other errors of [`BookingService::reserve`].
    pub fn create_reservation(&mut self, request: ReservationRequest) -> Result<Reservation> {
        self.reserve(ReserveOptions::new(request), false)?
            .reservation
            .ok_or_else(|| Error::not_found("created reservation"))
    }

    /// Plans and, unless `dry_run`, applies a status change.
    ///
    /// # Errors
    ///
    /// See [`TransitionPlan::build_plan`].
    pub fn transition(
        &mut self,
        options: TransitionOptions,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, _| TransitionPlan::new(options).build_plan(conn))
    }

    /// Moves a reservation to `status` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] or [`Error::InvalidTransition`] when
    /// the state machine refuses the change.
    pub fn transition_status(
        &mut self,
        reservation_id: i64,
        actor: Actor,
        status: ReservationStatus,
        notes: Option<String>,
    ) -> Result<Reservation> {
        let options = TransitionOptions::new(reservation_id, actor, status).with_notes(notes);
        self.transition(options, false)?
            .reservation
            .ok_or_else(|| Error::not_found(format!("reservation {reservation_id}")))
    }

    /// Asks the retention policy about a reservation without deleting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown reservation.
    pub fn can_delete_from_history(
        &self,
        reservation_id: i64,
        actor: Actor,
    ) -> Result<RetentionDecision> {
        DeletePlan::new(DeleteOptions::new(reservation_id, actor, self.now()))
            .decide(self.db.connection())
    }

    /// Hard-deletes a reservation when the retention policy allows it.
    ///
    /// # Errors
    ///
    /// See [`DeletePlan::build_plan`].
    pub fn delete_from_history(&mut self, reservation_id: i64, actor: Actor) -> Result<()> {
        let options = DeleteOptions::new(reservation_id, actor, self.now());
        self.run(false, |conn, _| DeletePlan::new(options).build_plan(conn))?;
        Ok(())
    }

    /// Flips a room's availability flag and tells holders of upcoming
    /// reservations. Existing reservations are not touched.
    ///
    /// # Errors
    ///
    /// See [`AvailabilityPlan::build_plan`].
    pub fn set_room_availability(
        &mut self,
        actor: Actor,
        room_id: i64,
        available: bool,
    ) -> Result<ExecutionResult> {
        let options = AvailabilityOptions {
            room_id,
            available,
            actor,
            from: self.today(),
        };
        self.run(false, |conn, _| AvailabilityPlan::new(options).build_plan(conn))
    }

    /// Adds a room. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and a validation error
    /// for malformed or duplicate rooms.
    pub fn add_room(&mut self, actor: Actor, room: NewRoom) -> Result<Room> {
        if !actor.is_admin() {
            return Err(Error::unauthorized("add rooms"));
        }
        let tx = self.db.begin_transaction()?;
        let room = Database::insert_room(&tx, room)?;
        tx.commit()?;
        log::info!("room {} added as #{}", room.label(), room.id);
        Ok(room)
    }

    /// Replaces a room's number, building, capacity, type and equipment.
    /// Admin only. Availability changes go through
    /// [`BookingService::set_room_availability`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins, [`Error::NotFound`]
    /// for an unknown room and a validation error for malformed or
    /// duplicate rooms.
    pub fn update_room(&mut self, actor: Actor, room_id: i64, room: NewRoom) -> Result<Room> {
        if !actor.is_admin() {
            return Err(Error::unauthorized("update rooms"));
        }
        let tx = self.db.begin_transaction()?;
        let room = Database::update_room(&tx, room_id, room)?;
        tx.commit()?;
        log::info!("room #{} updated to {}", room.id, room.label());
        Ok(room)
    }

    /// Deletes a room with its classes and past reservations. Admin only.
    ///
    /// Refused while anyone holds an upcoming pending or approved
    /// reservation in the room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins, [`Error::NotFound`]
    /// for an unknown room and a validation error while upcoming bookings
    /// remain.
    pub fn delete_room(&mut self, actor: Actor, room_id: i64) -> Result<()> {
        if !actor.is_admin() {
            return Err(Error::unauthorized("delete rooms"));
        }
        let today = self.today();
        let tx = self.db.begin_transaction()?;
        let room = Database::require_room(&tx, room_id)?;
        let holders = Database::upcoming_holders(&tx, room_id, today)?;
        if !holders.is_empty() {
            return Err(Error::Validation {
                field: "room_id".into(),
                message: format!(
                    "{} has {} upcoming reservation(s); cancel or reject them first",
                    room.label(),
                    holders.len()
                ),
            });
        }
        Database::delete_room(&tx, room_id)?;
        tx.commit()?;
        log::info!("room {} (#{room_id}) deleted", room.label());
        Ok(())
    }

    /// Lists all rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn rooms(&self) -> Result<Vec<Room>> {
        Database::list_rooms(self.db.connection())
    }

    /// Looks up one room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room.
    pub fn room(&self, room_id: i64) -> Result<Room> {
        Database::require_room(self.db.connection(), room_id)
    }

    /// Adds a weekly class.
    ///
    /// Admins may schedule anyone; instructors only themselves. The class
    /// must not overlap another class in the same room on the same day, nor
    /// any upcoming pending or approved reservation falling on that weekday.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`], a validation error when the named
    /// instructor is a student, or [`Error::ReservationConflict`] listing
    /// the overlapping reservations and classes.
    pub fn add_schedule(&mut self, actor: Actor, schedule: NewClassSchedule) -> Result<ClassSchedule> {
        let permitted = actor.is_admin()
            || (actor.role == Role::Instructor && actor.owns(schedule.instructor_id));
        if !permitted {
            return Err(Error::unauthorized("schedule this class"));
        }

        let today = self.today();
        let tx = self.db.begin_transaction()?;
        let instructor = Database::require_user(&tx, schedule.instructor_id)?;
        if instructor.role == Role::Student {
            return Err(Error::Validation {
                field: "instructor_id".into(),
                message: format!("{} is not an instructor", instructor.name),
            });
        }
        let booked = Database::upcoming_slots_on(&tx, schedule.room_id, today, schedule.day_of_week)?;
        let existing = Database::class_slots(&tx, schedule.room_id, schedule.day_of_week)?;
        let conflicts = find_conflicts(&schedule.time_range, &booked, &existing);
        if !conflicts.is_empty() {
            return Err(Error::ReservationConflict { conflicts });
        }
        let schedule = Database::insert_schedule(&tx, schedule)?;
        tx.commit()?;
        log::info!("class {} scheduled as #{}", schedule.label(), schedule.id);
        Ok(schedule)
    }

    /// Lists the weekly timetable, optionally for one room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn schedules(&self, room_id: Option<i64>) -> Result<Vec<ClassSlot>> {
        Database::list_schedules(self.db.connection(), room_id)
    }

    /// Removes a class from the timetable. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] for an unknown class.
    pub fn remove_schedule(&mut self, actor: Actor, schedule_id: i64) -> Result<()> {
        if !actor.is_admin() {
            return Err(Error::unauthorized("remove classes"));
        }
        let tx = self.db.begin_transaction()?;
        if !Database::delete_schedule(&tx, schedule_id)? {
            return Err(Error::not_found(format!("class schedule {schedule_id}")));
        }
        tx.commit()?;
        Ok(())
    }

    /// Creates an account and returns it with its access token.
    ///
    /// Requires an admin, except for the very first account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] or a validation error for malformed
    /// or duplicate input.
    pub fn add_user(&mut self, actor: Option<Actor>, user: NewUser) -> Result<(User, String)> {
        let tx = self.db.begin_transaction()?;
        let bootstrap = Database::count_users(&tx)? == 0;
        if !bootstrap && !actor.is_some_and(|a| a.is_admin()) {
            return Err(Error::unauthorized("create accounts"));
        }
        let created = Database::insert_user(&tx, user)?;
        tx.commit()?;
        log::info!("user {} created with role {}", created.0.email, created.0.role);
        Ok(created)
    }

    /// Returns the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the account no longer exists.
    pub fn user(&self, actor: Actor) -> Result<User> {
        Database::require_user(self.db.connection(), actor.user_id)
    }

    /// Lists accounts. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins.
    pub fn users(&self, actor: Actor) -> Result<Vec<User>> {
        if !actor.is_admin() {
            return Err(Error::unauthorized("list accounts"));
        }
        Database::list_users(self.db.connection())
    }

    /// Lists reservations the actor may see.
    ///
    /// Students and instructors only see their own; admins see all and may
    /// filter by user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations(&self, actor: Actor, filter: ReservationFilter) -> Result<Vec<Reservation>> {
        let filter = if actor.is_admin() {
            filter
        } else {
            filter.for_user(actor.user_id)
        };
        Database::list_reservations(self.db.connection(), &filter)
    }

    /// Looks up one reservation the actor may see.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] when a non-admin asks for someone
    /// else's reservation or an unknown id, and [`Error::NotFound`] when an
    /// admin asks for an unknown id.
    pub fn reservation(&self, actor: Actor, reservation_id: i64) -> Result<Reservation> {
        Database::require_visible_reservation(
            self.db.connection(),
            reservation_id,
            &actor,
            "view this reservation",
        )
    }

    /// Lists the actor's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn notifications(&self, actor: Actor, unread_only: bool) -> Result<Vec<StoredNotification>> {
        Database::list_notifications(self.db.connection(), actor.user_id, unread_only)
    }

    /// Marks one or all of the actor's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_notifications_read(&mut self, actor: Actor, id: Option<i64>) -> Result<usize> {
        let tx = self.db.begin_transaction()?;
        let updated = Database::mark_notifications_read(&tx, actor.user_id, id)?;
        tx.commit()?;
        Ok(updated)
    }
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("db", &self.db)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
