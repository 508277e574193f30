//! Conflict detection against reservations and the weekly timetable.

mod common;

use chrono::{Days, Weekday};
use common::{monday, request_on, TestEnv};
use roomres::{ConflictKind, NewClassSchedule, ReservationStatus, TimeRange};

fn slot(start: &str, end: &str) -> TimeRange {
    TimeRange::parse(start, end).unwrap()
}

#[test]
fn test_monday_class_blocks_every_monday() {
    let mut env = TestEnv::new();
    let room = env.room("204");
    env.service
        .add_schedule(
            env.instructor.actor(),
            NewClassSchedule {
                room_id: room.id,
                instructor_id: env.instructor.id,
                course_code: "CS101".into(),
                course_name: "Intro to Programming".into(),
                day_of_week: Weekday::Mon,
                time_range: slot("13:00", "15:00"),
            },
        )
        .unwrap();

    let next_monday = monday().checked_add_days(Days::new(7)).unwrap();
    for date in [monday(), next_monday] {
        let conflicts = env
            .service
            .check_conflicts(room.id, date, &slot("14:00", "16:00"))
            .unwrap();
        assert_eq!(conflicts.len(), 1, "{date}");
        assert_eq!(conflicts[0].kind, ConflictKind::Class);
        assert_eq!(conflicts[0].label, "CS101 Intro to Programming");
        assert_eq!(conflicts[0].party, "Grace Hopper");
    }

    // Tuesday is free, and so is the slot right after class
    let tuesday = monday().checked_add_days(Days::new(1)).unwrap();
    assert!(env
        .service
        .check_conflicts(room.id, tuesday, &slot("14:00", "16:00"))
        .unwrap()
        .is_empty());
    assert!(env
        .service
        .check_conflicts(room.id, monday(), &slot("15:00", "16:00"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_inactive_reservations_do_not_block() {
    let mut env = TestEnv::new();
    let room = env.room("10");
    let bob = env.another_student("Bob");
    let admin = env.admin.actor();

    let rejected = env
        .service
        .create_reservation(request_on(room.id, env.student.id, monday(), "09:00", "10:00", "Rehearsal"))
        .unwrap();
    env.service
        .transition_status(rejected.id(), admin, ReservationStatus::Rejected, Some("Maintenance".into()))
        .unwrap();

    let cancelled = env
        .service
        .create_reservation(request_on(room.id, bob.id, monday(), "09:30", "10:30", "Meeting"))
        .unwrap();
    env.service
        .transition_status(cancelled.id(), bob.actor(), ReservationStatus::Cancelled, None)
        .unwrap();

    assert!(env
        .service
        .check_conflicts(room.id, monday(), &slot("09:00", "10:30"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_reservations_listed_before_classes() {
    let mut env = TestEnv::new();
    let room = env.room("10");
    env.service
        .add_schedule(
            env.admin.actor(),
            NewClassSchedule {
                room_id: room.id,
                instructor_id: env.instructor.id,
                course_code: "MA201".into(),
                course_name: "Linear Algebra".into(),
                day_of_week: Weekday::Mon,
                time_range: slot("08:00", "09:30"),
            },
        )
        .unwrap();

    let later = env
        .service
        .create_reservation(request_on(room.id, env.student.id, monday(), "10:00", "11:00", "Tutoring"))
        .unwrap();

    let conflicts = env
        .service
        .check_conflicts(room.id, monday(), &slot("09:00", "10:30"))
        .unwrap();
    let kinds: Vec<_> = conflicts.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ConflictKind::Reservation, ConflictKind::Class]);
    assert_eq!(conflicts[0].source_id, later.id());
    assert_eq!(conflicts[0].status, Some(ReservationStatus::Pending));
}

#[test]
fn test_other_dates_and_rooms_ignored() {
    let mut env = TestEnv::new();
    let ten = env.room("10");
    let eleven = env.room("11");
    env.service
        .create_reservation(request_on(ten.id, env.student.id, monday(), "09:00", "11:00", "Lab"))
        .unwrap();

    let tuesday = monday().checked_add_days(Days::new(1)).unwrap();
    assert!(env
        .service
        .check_conflicts(ten.id, tuesday, &slot("09:00", "11:00"))
        .unwrap()
        .is_empty());
    assert!(env
        .service
        .check_conflicts(eleven.id, monday(), &slot("09:00", "11:00"))
        .unwrap()
        .is_empty());
}
