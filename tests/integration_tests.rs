use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_roster, rat, setup_test_db};

#[test]
fn test_take_full_walk_and_review() {
    let db_path = setup_test_db("take_full_walk");
    init_db_with_roster(&db_path, "Math", &["R01", "R02", "R03"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "PAP"])
        .assert()
        .success()
        .stdout(contains("Attendance saved (#1)"))
        .stdout(contains("Present : 2"))
        .stdout(contains("Absent  : 1"))
        .stdout(contains("67%"));

    rat()
        .args(["--db", &db_path, "history", "list"])
        .assert()
        .success()
        .stdout(contains("Attendance history for Math"))
        .stdout(contains("67%"))
        .stdout(contains("Page 1/1"));

    rat()
        .args(["--db", &db_path, "history", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Student R02"))
        .stdout(contains("absent"))
        .stdout(contains("2/3 present"));
}

#[test]
fn test_take_requires_login() {
    let db_path = setup_test_db("take_requires_login");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "take", "--marks", "P"])
        .assert()
        .failure()
        .stderr(contains("No active teacher"));
}

#[test]
fn test_invalid_marks_change_nothing() {
    let db_path = setup_test_db("take_invalid_marks");
    init_db_with_roster(&db_path, "Math", &["R01", "R02"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "PX"])
        .assert()
        .failure()
        .stderr(contains("invalid mark 'X'"));

    rat()
        .args(["--db", &db_path, "history", "list"])
        .assert()
        .success()
        .stdout(contains("No attendance records"));
}

#[test]
fn test_partial_walk_is_abandoned() {
    let db_path = setup_test_db("take_partial");
    init_db_with_roster(&db_path, "Math", &["R01", "R02", "R03"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "PA"])
        .assert()
        .success()
        .stdout(contains("abandoned after 2 of 3"))
        .stdout(contains("Attendance saved").not());
}

#[test]
fn test_retake_after_save_creates_second_record() {
    let db_path = setup_test_db("take_retake");
    init_db_with_roster(&db_path, "Math", &["R01", "R02"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "AA R PP"])
        .assert()
        .success()
        .stdout(contains("Attendance saved (#1)"))
        .stdout(contains("Attendance saved (#2)"));

    rat()
        .args(["--db", &db_path, "history", "list", "--limit", "1", "--page", "2"])
        .assert()
        .success()
        .stdout(contains("Page 2/2"))
        .stdout(contains("0%"));
}

#[test]
fn test_empty_roster_saves_immediately() {
    let db_path = setup_test_db("take_empty_roster");
    init_db_with_roster(&db_path, "Math", &[]);

    rat()
        .args(["--db", &db_path, "take"])
        .assert()
        .success()
        .stdout(contains("No students on the roster"))
        .stdout(contains("Attendance saved (#1): 0 present, 0 absent, 0%."));
}

#[test]
fn test_history_pages_and_dates() {
    let db_path = setup_test_db("history_pages");
    init_db_with_roster(&db_path, "Math", &["R01"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "P"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "history", "list", "--page", "5"])
        .assert()
        .success()
        .stdout(contains("on page 5 (total 1, pages 1)"));

    rat()
        .args(["--db", &db_path, "history", "list", "--date", "today"])
        .assert()
        .success()
        .stdout(contains("100%"));

    rat()
        .args(["--db", &db_path, "history", "list", "--date", "2000-01-01"])
        .assert()
        .success()
        .stdout(contains("No attendance records"));

    rat()
        .args(["--db", &db_path, "history", "list", "--date", "01/02/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rat()
        .args(["--db", &db_path, "history", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_history_follows_active_subject() {
    let db_path = setup_test_db("history_subjects");
    init_db_with_roster(&db_path, "Math", &["R01"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "P"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "subject", "Physics"])
        .assert()
        .failure()
        .stderr(contains("--add"));

    rat()
        .args(["--db", &db_path, "subject", "Physics", "--add"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "history", "list"])
        .assert()
        .success()
        .stdout(contains("No attendance records for Physics"));

    rat()
        .args(["--db", &db_path, "history", "list", "--all-subjects"])
        .assert()
        .success()
        .stdout(contains("Math"));
}

#[test]
fn test_student_roster_commands() {
    let db_path = setup_test_db("student_roster");
    init_db_with_roster(&db_path, "Math", &["R02", "R01"]);

    rat()
        .args(["--db", &db_path, "student", "list"])
        .assert()
        .success()
        .stdout(contains("Roster for Math (2 students)"))
        .stdout(contains("R02"));

    rat()
        .args([
            "--db", &db_path, "student", "add", "--name", "Copy", "--roll", "R01", "--class", "5",
            "--section", "A", "--age", "10", "--gender", "Male",
        ])
        .assert()
        .failure()
        .stderr(contains("Duplicate key"));

    rat()
        .args([
            "--db", &db_path, "student", "add", "--name", "Tiny", "--roll", "R09", "--class", "1",
            "--section", "A", "--age", "3", "--gender", "Male",
        ])
        .assert()
        .failure()
        .stderr(contains("age 3 out of range"));

    rat()
        .args(["--db", &db_path, "student", "edit", "1", "--age", "14"])
        .assert()
        .success()
        .stdout(contains("updated"));

    rat()
        .args(["--db", &db_path, "student", "del", "2", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been removed"));

    rat()
        .args(["--db", &db_path, "student", "show", "2"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_login_whoami_logout() {
    let db_path = setup_test_db("login_cycle");
    init_db_with_roster(&db_path, "Math", &[]);

    rat()
        .args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("adalovelace@temp.com"))
        .stdout(contains("Math"));

    rat()
        .args(["--db", &db_path, "logout"])
        .assert()
        .success()
        .stdout(contains("Logged out"));

    rat()
        .args(["--db", &db_path, "student", "list"])
        .assert()
        .failure()
        .stderr(contains("No active teacher"));
}

#[test]
fn test_stats_dashboard() {
    let db_path = setup_test_db("stats_dashboard");
    init_db_with_roster(&db_path, "Math", &["R01", "R02"]);

    rat()
        .args(["--db", &db_path, "take", "--marks", "PA"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Dashboard for Ada Lovelace"))
        .stdout(contains("Students:"))
        .stdout(contains("Average rate (7 days):"))
        .stdout(contains("50%"));
}

#[test]
fn test_db_info_and_log() {
    let db_path = setup_test_db("db_info_log");
    init_db_with_roster(&db_path, "Math", &["R01"]);

    rat()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Attendance sessions"))
        .stdout(contains("Integrity check passed"));

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("Added student"));
}

#[test]
fn test_db_migrate_and_vacuum() {
    let db_path = setup_test_db("db_migrate_vacuum");
    init_db_with_roster(&db_path, "Math", &[]);

    rat()
        .args(["--db", &db_path, "db", "--migrate", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("20251006_0002_history_indexes"))
        .stdout(contains("Schema is up to date"))
        .stdout(contains("Vacuum completed"));

    rat()
        .args(["--db", &db_path, "db"])
        .assert()
        .success()
        .stdout(contains("Nothing to do"));
}
