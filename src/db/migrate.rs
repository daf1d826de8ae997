use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column called `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Teachers, their active login context and their students.
fn create_roster_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            subjects    TEXT NOT NULL DEFAULT '[]',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS context (
            id          INTEGER PRIMARY KEY CHECK (id = 1),
            teacher_id  INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
            subject     TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS students (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id   INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
            name         TEXT NOT NULL,
            roll_number  TEXT NOT NULL,
            class        TEXT NOT NULL,
            section      TEXT NOT NULL,
            age          INTEGER NOT NULL CHECK(age BETWEEN 5 AND 25),
            gender       TEXT NOT NULL CHECK(gender IN ('Male','Female','Other')),
            photo        TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL,
            UNIQUE (teacher_id, roll_number)
        );

        CREATE INDEX IF NOT EXISTS idx_students_teacher ON students(teacher_id, id);
        "#,
    )?;
    Ok(())
}

/// Finalized sessions and the per-student marks they carry.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id   INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
            subject      TEXT NOT NULL,
            started_at   TEXT NOT NULL,
            created_at   TEXT NOT NULL,
            created_ts   INTEGER NOT NULL,
            total        INTEGER NOT NULL,
            present      INTEGER NOT NULL,
            absent       INTEGER NOT NULL,
            rate         INTEGER NOT NULL CHECK(rate BETWEEN 0 AND 100)
        );

        CREATE TABLE IF NOT EXISTS attendance_marks (
            attendance_id  INTEGER NOT NULL REFERENCES attendance(id) ON DELETE CASCADE,
            position       INTEGER NOT NULL,
            student_id     INTEGER NOT NULL,
            name           TEXT NOT NULL,
            roll_number    TEXT NOT NULL,
            class          TEXT NOT NULL,
            section        TEXT NOT NULL,
            status         TEXT NOT NULL CHECK(status IN ('present','absent')),
            PRIMARY KEY (attendance_id, position),
            UNIQUE (attendance_id, student_id)
        );
        "#,
    )?;
    Ok(())
}

/// Older databases stored only the save time; add the walk start time.
fn migrate_add_started_at(conn: &Connection) -> Result<()> {
    if has_column(conn, "attendance", "started_at")? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        ALTER TABLE attendance ADD COLUMN started_at TEXT NOT NULL DEFAULT '';
        UPDATE attendance SET started_at = created_at WHERE started_at = '';
        "#,
    )?;

    success("Added 'started_at' column to attendance table.");
    Ok(())
}

fn migrate_add_history_indexes(conn: &Connection) -> Result<()> {
    let version = "20251006_0002_history_indexes";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_teacher_ts
            ON attendance(teacher_id, subject, created_ts DESC);
        CREATE INDEX IF NOT EXISTS idx_attendance_created_ts
            ON attendance(created_ts);
        "#,
    )?;

    mark_applied(conn, version, "Added history lookup indexes")?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::initialize::init_db(). Safe to call on every start:
/// nothing is printed when the schema is already current.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Roster tables
    if !table_exists(conn, "students")? {
        create_roster_tables(conn)?;
        success("Created teachers / students tables.");
    } else {
        create_roster_tables(conn)?;
    }

    // 3) History tables
    if !table_exists(conn, "attendance")? {
        create_attendance_tables(conn)?;
        success("Created attendance tables.");
    } else {
        migrate_add_started_at(conn)?;
        create_attendance_tables(conn)?;
    }

    // 4) Versioned migrations
    migrate_add_history_indexes(conn)?;

    Ok(())
}

/// Names of the versioned migrations recorded in the log table.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
