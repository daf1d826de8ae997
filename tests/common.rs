#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::core::context::ContextLogic;
use rattendance::core::roster::RosterStore;
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use rattendance::models::student::{NewStudent, Student};
use rattendance::models::teacher::ActiveContext;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const PHOTO: &str = "https://example.org/default.png";

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init the DB, log in and add `rolls.len()` students via the CLI.
pub fn init_db_with_roster(db_path: &str, subject: &str, rolls: &[&str]) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rat()
        .args(["--db", db_path, "login", "--name", "Ada Lovelace", "--subject", subject])
        .assert()
        .success();

    for (i, roll) in rolls.iter().enumerate() {
        let name = format!("Student {}", roll);
        let age = (10 + i).to_string();
        rat()
            .args([
                "--db", db_path, "student", "add", "--name", &name, "--roll", roll, "--class",
                "5", "--section", "A", "--age", &age, "--gender", "Female",
            ])
            .assert()
            .success();
    }
}

/// In-memory pool with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn student(roll: &str) -> NewStudent {
    NewStudent::new(
        &format!("Student {}", roll),
        roll,
        "5",
        "A",
        11,
        "male",
        None,
        PHOTO,
    )
    .expect("valid student")
}

/// Log in `name` for `subject` and give them one student per roll number.
pub fn login_with_students(
    pool: &mut DbPool,
    name: &str,
    subject: &str,
    rolls: &[&str],
) -> (ActiveContext, Vec<Student>) {
    let ctx = ContextLogic::login(pool, name, subject).expect("login");
    let roster = rolls
        .iter()
        .map(|r| RosterStore::add(pool, ctx.teacher.id, &student(r)).expect("add student"))
        .collect();
    (ctx, roster)
}
