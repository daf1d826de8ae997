use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_roster, rat, setup_test_db, temp_out};

fn db_with_session(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db_with_roster(&db_path, "Math", &["R01", "R02", "R03"]);
    rat()
        .args(["--db", &db_path, "take", "--marks", "PAP"])
        .assert()
        .success();
    db_path
}

#[test]
fn test_export_csv_one_row_per_mark() {
    let db_path = db_with_session("export_csv");
    let out = temp_out("export_csv", "csv");

    rat()
        .args(["--db", &db_path, "history", "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("attendance_id,created_at,subject,student_id,roll_number,name,class,section,status,session_rate")
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].contains("R02") && rows[1].contains("absent"));
    assert!(rows.iter().all(|r| r.ends_with(",67")));
}

#[test]
fn test_export_json_full_sessions() {
    let db_path = db_with_session("export_json");
    let out = temp_out("export_json", "json");

    rat()
        .args(["--db", &db_path, "history", "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let sessions = v.as_array().expect("array of sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["rate"], 67);
    assert_eq!(sessions[0]["students"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(sessions[0]["students"][1]["status"], "absent");
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = db_with_session("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "keep me").expect("seed file");

    // no stdin: the overwrite prompt reads EOF and declines
    rat()
        .args(["--db", &db_path, "history", "export", "--file", &out])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rat()
        .args(["--db", &db_path, "history", "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("R01"));
}

#[test]
fn test_export_nothing_to_write() {
    let db_path = setup_test_db("export_empty");
    init_db_with_roster(&db_path, "Math", &["R01"]);
    let out = temp_out("export_empty", "csv");

    rat()
        .args(["--db", &db_path, "history", "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No attendance records found"));
    assert!(!std::path::Path::new(&out).exists());
}
