//! The request, conflict, approval and history flow for one room on
//! 2025-03-10.

mod common;

use common::{monday, request_on, TestEnv};
use roomres::{ConflictKind, Error, NotificationKind, ReservationStatus, RetentionDecision};

#[test]
fn test_request_conflict_approve_and_purge() {
    let mut env = TestEnv::new();
    let room = env.room("10");
    let bob = env.another_student("Bob");
    let owner = env.student.actor();

    // Room 10 is empty that day
    let empty = env
        .service
        .check_conflicts(room.id, monday(), &roomres::TimeRange::parse("08:00", "18:00").unwrap())
        .unwrap();
    assert!(empty.is_empty());

    // Request A
    let a = env
        .service
        .create_reservation(request_on(room.id, env.student.id, monday(), "09:00", "11:00", "Study group"))
        .unwrap();
    assert_eq!(a.status(), ReservationStatus::Pending);

    // Request B collides with A
    let err = env
        .service
        .create_reservation(request_on(room.id, bob.id, monday(), "10:00", "10:30", "Quick sync"))
        .unwrap_err();
    let conflicts = err.conflicts().expect("conflict error");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Reservation);
    assert_eq!(conflicts[0].source_id, a.id());
    assert_eq!(conflicts[0].party, "Ada Lovelace");

    // Admin approves A and the owner hears about it
    let approved = env
        .service
        .transition_status(a.id(), env.admin.actor(), ReservationStatus::Approved, None)
        .unwrap();
    assert_eq!(approved.status(), ReservationStatus::Approved);

    let inbox = env.service.notifications(owner, false).unwrap();
    let approval = inbox
        .iter()
        .find(|n| n.kind == NotificationKind::Approved)
        .expect("approval notification");
    assert_eq!(approval.reservation_id, Some(a.id()));
    assert_eq!(approval.actor_id, Some(env.admin.id));
    assert!(inbox.iter().any(|n| n.kind == NotificationKind::Created));

    // Before 11:00 the approved booking stays
    env.clock.set(monday().and_hms_opt(10, 59, 0).unwrap());
    assert!(matches!(
        env.service.can_delete_from_history(a.id(), owner).unwrap(),
        RetentionDecision::Denied(_)
    ));
    assert!(matches!(
        env.service.delete_from_history(a.id(), owner),
        Err(Error::DeletionDenied { .. })
    ));

    // After 11:00 it can go
    env.clock.set(monday().and_hms_opt(11, 0, 1).unwrap());
    assert_eq!(
        env.service
            .reservation(owner, a.id())
            .unwrap()
            .effective_status(env.service.now()),
        ReservationStatus::Completed
    );
    env.service.delete_from_history(a.id(), owner).unwrap();
    assert!(matches!(
        env.service.reservation(env.admin.actor(), a.id()),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        env.service.reservation(owner, a.id()),
        Err(Error::Unauthorized { .. })
    ));

    // The freed slot is bookable again
    env.service
        .create_reservation(request_on(room.id, bob.id, monday(), "10:00", "10:30", "Quick sync"))
        .unwrap();
}
