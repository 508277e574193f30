//! Status transitions through the service, including authorization and
//! notification attribution.

mod common;

use common::{monday, request_on, TestEnv};
use roomres::{Error, NotificationKind, Reservation, ReservationStatus};

fn pending(env: &mut TestEnv) -> Reservation {
    let room = env.room("10");
    env.service
        .create_reservation(request_on(room.id, env.student.id, monday(), "09:00", "11:00", "Defense"))
        .unwrap()
}

#[test]
fn test_student_cannot_approve_own_request() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);

    let err = env
        .service
        .transition_status(r.id(), env.student.actor(), ReservationStatus::Approved, None)
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));

    let err = env
        .service
        .transition_status(r.id(), env.instructor.actor(), ReservationStatus::Rejected, None)
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));
}

#[test]
fn test_owner_cancel_is_unattributed() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);
    let owner = env.student.actor();

    let cancelled = env
        .service
        .transition_status(r.id(), owner, ReservationStatus::Cancelled, None)
        .unwrap();
    assert_eq!(cancelled.status(), ReservationStatus::Cancelled);

    let inbox = env.service.notifications(owner, false).unwrap();
    let cancel = inbox
        .iter()
        .find(|n| n.kind == NotificationKind::Cancelled)
        .unwrap();
    assert_eq!(cancel.actor_id, None);
}

#[test]
fn test_admin_cancel_of_approved_is_attributed() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);
    let admin = env.admin.actor();

    env.service
        .transition_status(r.id(), admin, ReservationStatus::Approved, None)
        .unwrap();
    let cancelled = env
        .service
        .transition_status(
            r.id(),
            admin,
            ReservationStatus::Cancelled,
            Some("Building closed".into()),
        )
        .unwrap();
    assert_eq!(cancelled.admin_notes(), Some("Building closed"));

    let inbox = env.service.notifications(env.student.actor(), true).unwrap();
    let cancel = inbox
        .iter()
        .find(|n| n.kind == NotificationKind::Cancelled)
        .unwrap();
    assert_eq!(cancel.actor_id, Some(env.admin.id));
    assert!(cancel.message.ends_with("Building closed"));
}

#[test]
fn test_terminal_states_refuse_changes() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);
    let admin = env.admin.actor();

    env.service
        .transition_status(r.id(), admin, ReservationStatus::Rejected, None)
        .unwrap();
    for target in [
        ReservationStatus::Approved,
        ReservationStatus::Cancelled,
        ReservationStatus::Pending,
        ReservationStatus::Completed,
    ] {
        let err = env
            .service
            .transition_status(r.id(), admin, target, None)
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidTransition { current: ReservationStatus::Rejected, .. }),
            "{target}: {err:?}"
        );
    }
}

#[test]
fn test_owner_cannot_cancel_finished_requests() {
    let mut env = TestEnv::new();
    let owner = env.student.actor();
    let admin = env.admin.actor();
    let room = env.room("10");

    let rejected = env
        .service
        .create_reservation(request_on(room.id, env.student.id, monday(), "09:00", "10:00", "Defense"))
        .unwrap();
    env.service
        .transition_status(rejected.id(), admin, ReservationStatus::Rejected, None)
        .unwrap();
    let err = env
        .service
        .transition_status(rejected.id(), owner, ReservationStatus::Cancelled, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition {
            current: ReservationStatus::Rejected,
            requested: ReservationStatus::Cancelled
        }
    ));

    let withdrawn = env
        .service
        .create_reservation(request_on(room.id, env.student.id, monday(), "13:00", "14:00", "Rehearsal"))
        .unwrap();
    env.service
        .transition_status(withdrawn.id(), owner, ReservationStatus::Cancelled, None)
        .unwrap();
    let err = env
        .service
        .transition_status(withdrawn.id(), owner, ReservationStatus::Cancelled, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition {
            current: ReservationStatus::Cancelled,
            requested: ReservationStatus::Cancelled
        }
    ));
}

#[test]
fn test_stranger_cannot_cancel() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);
    let bob = env.another_student("Bob");

    let err = env
        .service
        .transition_status(r.id(), bob.actor(), ReservationStatus::Cancelled, None)
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));
    assert_eq!(
        env.service
            .reservation(env.student.actor(), r.id())
            .unwrap()
            .status(),
        ReservationStatus::Pending
    );
}

#[test]
fn test_availability_toggle_notifies_without_touching_bookings() {
    let mut env = TestEnv::new();
    let r = pending(&mut env);
    let admin = env.admin.actor();

    let result = env
        .service
        .set_room_availability(admin, r.room_id(), false)
        .unwrap();
    assert_eq!(result.events.len(), 1);

    let inbox = env.service.notifications(env.student.actor(), true).unwrap();
    assert!(inbox.iter().any(|n| n.kind == NotificationKind::RoomAvailability));
    assert_eq!(
        env.service
            .reservation(admin, r.id())
            .unwrap()
            .status(),
        ReservationStatus::Pending
    );

    // New requests are refused while the flag is off
    let err = env
        .service
        .create_reservation(request_on(r.room_id(), env.student.id, monday(), "13:00", "14:00", "Later"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let marked = env
        .service
        .mark_notifications_read(env.student.actor(), None)
        .unwrap();
    assert!(marked >= 2);
    assert!(env
        .service
        .notifications(env.student.actor(), true)
        .unwrap()
        .is_empty());
}
