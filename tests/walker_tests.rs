use chrono::{Local, TimeZone};
use rattendance::core::calculator::aggregate::{aggregate, average_rate, round_percent};
use rattendance::core::walker::{SessionWalker, WalkerState};
use rattendance::errors::AppError;
use rattendance::models::gender::Gender;
use rattendance::models::session::Decision;
use rattendance::models::status::AttendanceStatus::{Absent, Present};
use rattendance::models::student::Student;

fn roster(n: i64) -> Vec<Student> {
    (1..=n)
        .map(|id| Student {
            id,
            teacher_id: 1,
            name: format!("Student {}", id),
            roll_number: format!("R{:02}", id),
            class: "5".into(),
            section: "A".into(),
            age: 11,
            gender: Gender::Other,
            photo: String::new(),
            created_at: String::new(),
        })
        .collect()
}

#[test]
fn test_walk_marks_in_roster_order() {
    let mut w = SessionWalker::start("Math", roster(3));
    assert_eq!(w.state(), WalkerState::InProgress { position: 0 });
    assert_eq!(w.current().map(|s| s.id), Some(1));

    assert_eq!(w.decide(Present).unwrap(), WalkerState::InProgress { position: 1 });
    assert_eq!(w.decide(Absent).unwrap(), WalkerState::InProgress { position: 2 });
    assert_eq!(w.decide(Present).unwrap(), WalkerState::Complete);

    let ids: Vec<i64> = w.decisions().iter().map(|d| d.student_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(w.current().is_none());

    let agg = w.aggregates();
    assert_eq!((agg.total, agg.present, agg.absent, agg.rate), (3, 2, 1, 67));
}

#[test]
fn test_decide_past_end_changes_nothing() {
    let mut w = SessionWalker::start("Math", roster(1));
    w.decide(Absent).unwrap();

    let err = w.decide(Present).unwrap_err();
    assert!(matches!(err, AppError::OutOfRange(_)));
    assert!(err.is_ignorable());

    assert_eq!(w.decisions().len(), 1);
    assert_eq!(w.decisions()[0].status, Absent);
    assert_eq!(w.state(), WalkerState::Complete);
}

#[test]
fn test_empty_roster_is_complete_immediately() {
    let mut w = SessionWalker::start("Math", Vec::new());
    assert!(w.is_empty());
    assert_eq!(w.state(), WalkerState::Complete);
    assert!(w.decide(Present).is_err());

    let session = w.finish().unwrap();
    assert_eq!(session.aggregates.total, 0);
    assert_eq!(session.aggregates.rate, 0);
}

#[test]
fn test_retake_restarts_from_first_student() {
    let t0 = Local.with_ymd_and_hms(2025, 10, 6, 9, 0, 0).unwrap();
    let mut w = SessionWalker::start_at("Math", roster(2), t0);
    w.decide(Present).unwrap();
    w.decide(Present).unwrap();
    assert!(w.is_complete());

    w.retake();
    assert_eq!(w.state(), WalkerState::InProgress { position: 0 });
    assert!(w.decisions().is_empty());
    assert_eq!(w.current().map(|s| s.id), Some(1));

    w.decide(Absent).unwrap();
    w.decide(Absent).unwrap();
    let session = w.finish().unwrap();
    assert!(session.started_at > t0);
    assert_eq!(session.aggregates.present, 0);
}

#[test]
fn test_finish_rejects_incomplete_walk() {
    let mut w = SessionWalker::start("Math", roster(2));
    w.decide(Present).unwrap();
    assert!(matches!(w.finish(), Err(AppError::Validation(_))));
}

#[test]
fn test_round_percent_half_up() {
    assert_eq!(round_percent(2, 3), 67);
    assert_eq!(round_percent(1, 3), 33);
    assert_eq!(round_percent(1, 8), 13); // 12.5
    assert_eq!(round_percent(1, 200), 1); // 0.5
    assert_eq!(round_percent(0, 5), 0);
    assert_eq!(round_percent(5, 5), 100);
    assert_eq!(round_percent(0, 0), 0);
}

#[test]
fn test_aggregate_counts_decisions() {
    let decisions = [
        Decision { student_id: 1, status: Present },
        Decision { student_id: 2, status: Absent },
        Decision { student_id: 3, status: Absent },
        Decision { student_id: 4, status: Present },
    ];
    let agg = aggregate(&decisions, 4);
    assert_eq!(agg.total, 4);
    assert_eq!(agg.present + agg.absent, agg.total);
    assert_eq!(agg.rate, 50);
}

#[test]
fn test_average_rate() {
    assert_eq!(average_rate(&[]), 0);
    assert_eq!(average_rate(&[67, 100]), 84); // 83.5
    assert_eq!(average_rate(&[50, 50, 51]), 50);
}
