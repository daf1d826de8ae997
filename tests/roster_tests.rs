mod common;
use common::{PHOTO, login_with_students, memory_pool, student};
use rattendance::core::context::ContextLogic;
use rattendance::core::roster::RosterStore;
use rattendance::errors::AppError;
use rattendance::models::student::{NewStudent, StudentPatch};

#[test]
fn test_login_creates_teacher_once() {
    let mut pool = memory_pool();

    let first = ContextLogic::login(&mut pool, "Ada Lovelace", "Math").unwrap();
    assert_eq!(first.teacher.email, "adalovelace@temp.com");
    assert_eq!(first.subject, "Math");

    let second = ContextLogic::login(&mut pool, "ada  lovelace", "Physics").unwrap();
    assert_eq!(second.teacher.id, first.teacher.id);
    assert_eq!(second.teacher.subjects, vec!["Math", "Physics"]);

    let current = ContextLogic::require(&mut pool).unwrap();
    assert_eq!(current.subject, "Physics");
}

#[test]
fn test_logout_clears_context() {
    let mut pool = memory_pool();
    ContextLogic::login(&mut pool, "Ada", "Math").unwrap();

    assert!(ContextLogic::logout(&mut pool).unwrap());
    assert!(!ContextLogic::logout(&mut pool).unwrap());
    assert!(matches!(
        ContextLogic::require(&mut pool),
        Err(AppError::NotLoggedIn)
    ));
}

#[test]
fn test_switch_subject_requires_add_for_new_subject() {
    let mut pool = memory_pool();
    ContextLogic::login(&mut pool, "Ada", "Math").unwrap();

    assert!(matches!(
        ContextLogic::switch_subject(&mut pool, "Chemistry", false),
        Err(AppError::Validation(_))
    ));

    let ctx = ContextLogic::switch_subject(&mut pool, "Chemistry", true).unwrap();
    assert_eq!(ctx.subject, "Chemistry");
    assert!(ctx.teacher.teaches("Chemistry"));
}

#[test]
fn test_roster_keeps_creation_order() {
    let mut pool = memory_pool();
    let (ctx, added) = login_with_students(&mut pool, "Ada", "Math", &["R03", "R01", "R02"]);

    let roster = RosterStore::list(&mut pool, &ctx.teacher, "Math").unwrap();
    let rolls: Vec<&str> = roster.iter().map(|s| s.roll_number.as_str()).collect();
    assert_eq!(rolls, vec!["R03", "R01", "R02"]);
    assert_eq!(roster, added);
}

#[test]
fn test_roster_rejects_unknown_subject() {
    let mut pool = memory_pool();
    let (ctx, _) = login_with_students(&mut pool, "Ada", "Math", &["R01"]);

    assert!(matches!(
        RosterStore::list(&mut pool, &ctx.teacher, "History"),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_duplicate_roll_number_per_teacher() {
    let mut pool = memory_pool();
    let (ada, _) = login_with_students(&mut pool, "Ada", "Math", &["R01"]);

    let err = RosterStore::add(&mut pool, ada.teacher.id, &student("R01")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
    assert_eq!(RosterStore::count(&mut pool, ada.teacher.id).unwrap(), 1);

    // the same roll number is fine for somebody else
    let (grace, _) = login_with_students(&mut pool, "Grace", "Math", &["R01"]);
    assert_eq!(RosterStore::count(&mut pool, grace.teacher.id).unwrap(), 1);
}

#[test]
fn test_new_student_validation() {
    assert!(NewStudent::new("Ann", "R1", "5", "A", 4, "female", None, PHOTO).is_err());
    assert!(NewStudent::new("Ann", "R1", "5", "A", 26, "female", None, PHOTO).is_err());
    assert!(NewStudent::new("  ", "R1", "5", "A", 10, "female", None, PHOTO).is_err());
    assert!(NewStudent::new("Ann", "R1", "5", "A", 10, "robot", None, PHOTO).is_err());

    let ok = NewStudent::new("Ann", " R1 ", "5", "A", 25, "F", Some(""), PHOTO).unwrap();
    assert_eq!(ok.roll_number, "R1");
    assert_eq!(ok.photo, PHOTO);
}

#[test]
fn test_update_and_remove_student() {
    let mut pool = memory_pool();
    let (ctx, added) = login_with_students(&mut pool, "Ada", "Math", &["R01", "R02"]);
    let tid = ctx.teacher.id;

    let patch = StudentPatch {
        age: Some(12),
        section: Some("B".into()),
        ..Default::default()
    };
    let st = RosterStore::update(&mut pool, tid, added[0].id, &patch).unwrap();
    assert_eq!((st.age, st.section.as_str()), (12, "B"));
    assert_eq!(RosterStore::get(&mut pool, tid, st.id).unwrap(), st);

    let clash = StudentPatch {
        roll_number: Some("R02".into()),
        ..Default::default()
    };
    assert!(matches!(
        RosterStore::update(&mut pool, tid, added[0].id, &clash),
        Err(AppError::DuplicateKey(_))
    ));
    assert!(matches!(
        RosterStore::update(&mut pool, tid, added[0].id, &StudentPatch::default()),
        Err(AppError::Validation(_))
    ));

    RosterStore::remove(&mut pool, tid, added[1].id).unwrap();
    assert!(matches!(
        RosterStore::get(&mut pool, tid, added[1].id),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        RosterStore::remove(&mut pool, tid, added[1].id),
        Err(AppError::NotFound(_))
    ));
}
