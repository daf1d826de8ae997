use crate::errors::{AppError, AppResult};
use crate::models::history::{HistoryEntry, MarkedStudent};
use crate::models::session::Aggregates;
use crate::models::status::AttendanceStatus;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, Transaction, params};

/// WHERE clause for history lookups. Every lookup carries the retention
/// cutoff, so expired rows never leave this module.
#[derive(Debug, Clone)]
pub struct HistoryFilter {
    pub teacher_id: i64,
    pub subject: Option<String>,
    /// Inclusive creation-time bounds in unix millis.
    pub created_between: Option<(i64, i64)>,
    /// Rows created at or before this instant are expired.
    pub expired_at_or_before: i64,
}

impl HistoryFilter {
    fn to_sql(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses = vec!["teacher_id = ?".to_string(), "created_ts > ?".to_string()];
        let mut args: Vec<Box<dyn ToSql>> =
            vec![Box::new(self.teacher_id), Box::new(self.expired_at_or_before)];

        if let Some(subject) = &self.subject {
            clauses.push("subject = ?".into());
            args.push(Box::new(subject.clone()));
        }

        if let Some((from, to)) = self.created_between {
            clauses.push("created_ts >= ?".into());
            clauses.push("created_ts <= ?".into());
            args.push(Box::new(from));
            args.push(Box::new(to));
        }

        (clauses.join(" AND "), args)
    }
}

/// Row of `attendance` without its marks.
fn map_head(row: &Row) -> Result<HistoryEntry> {
    Ok(HistoryEntry {
        id: row.get("id")?,
        teacher_id: row.get("teacher_id")?,
        subject: row.get("subject")?,
        started_at: row.get("started_at")?,
        created_at: row.get("created_at")?,
        created_ts: row.get("created_ts")?,
        aggregates: Aggregates {
            total: row.get("total")?,
            present: row.get("present")?,
            absent: row.get("absent")?,
            rate: row.get("rate")?,
        },
        students: Vec::new(),
    })
}

fn map_mark(row: &Row) -> Result<MarkedStudent> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!("Invalid status: {}", status_str))),
        )
    })?;

    Ok(MarkedStudent {
        student_id: row.get("student_id")?,
        name: row.get("name")?,
        roll_number: row.get("roll_number")?,
        class: row.get("class")?,
        section: row.get("section")?,
        status,
    })
}

/// Insert one session and its marks. Runs inside the caller's transaction.
pub fn insert_attendance(
    tx: &Transaction,
    head: &HistoryEntry,
) -> Result<i64> {
    tx.execute(
        "INSERT INTO attendance (teacher_id, subject, started_at, created_at, created_ts, total, present, absent, rate)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            head.teacher_id,
            head.subject,
            head.started_at,
            head.created_at,
            head.created_ts,
            head.aggregates.total,
            head.aggregates.present,
            head.aggregates.absent,
            head.aggregates.rate,
        ],
    )?;
    let id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO attendance_marks (attendance_id, position, student_id, name, roll_number, class, section, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    for (pos, m) in head.students.iter().enumerate() {
        stmt.execute(params![
            id,
            pos as i64,
            m.student_id,
            m.name,
            m.roll_number,
            m.class,
            m.section,
            m.status.to_db_str(),
        ])?;
    }

    Ok(id)
}

pub fn load_marks(conn: &Connection, attendance_id: i64) -> AppResult<Vec<MarkedStudent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance_marks
         WHERE attendance_id = ?1
         ORDER BY position ASC",
    )?;
    let rows = stmt.query_map([attendance_id], map_mark)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_attendance(conn: &Connection, filter: &HistoryFilter) -> AppResult<u32> {
    let (clause, args) = filter.to_sql();
    let sql = format!("SELECT COUNT(*) FROM attendance WHERE {}", clause);

    let n: u32 = conn.query_row(
        &sql,
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        |row| row.get(0),
    )?;
    Ok(n)
}

/// One page of sessions, newest first, marks included.
pub fn load_attendance_page(
    conn: &Connection,
    filter: &HistoryFilter,
    limit: u32,
    offset: u64,
) -> AppResult<Vec<HistoryEntry>> {
    let (clause, mut args) = filter.to_sql();
    let sql = format!(
        "SELECT * FROM attendance
         WHERE {}
         ORDER BY created_ts DESC, id DESC
         LIMIT ? OFFSET ?",
        clause
    );
    args.push(Box::new(limit));
    args.push(Box::new(offset as i64));

    let mut entries = {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            map_head,
        )?;

        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    for e in entries.iter_mut() {
        e.students = load_marks(conn, e.id)?;
    }

    Ok(entries)
}

pub fn load_attendance(
    conn: &Connection,
    teacher_id: i64,
    id: i64,
    expired_at_or_before: i64,
) -> AppResult<Option<HistoryEntry>> {
    let head = conn
        .query_row(
            "SELECT * FROM attendance
             WHERE id = ?1 AND teacher_id = ?2 AND created_ts > ?3",
            params![id, teacher_id, expired_at_or_before],
            map_head,
        )
        .optional()?;

    match head {
        Some(mut e) => {
            e.students = load_marks(conn, e.id)?;
            Ok(Some(e))
        }
        None => Ok(None),
    }
}

/// Rates of every visible session created at or after `since_ts`.
pub fn rates_since(conn: &Connection, filter: &HistoryFilter, since_ts: i64) -> AppResult<Vec<u32>> {
    let (clause, mut args) = filter.to_sql();
    let sql = format!(
        "SELECT rate FROM attendance WHERE {} AND created_ts >= ?",
        clause
    );
    args.push(Box::new(since_ts));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        |row| row.get::<_, u32>(0),
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete every session created at or before `cutoff_ts`, all teachers.
pub fn delete_expired(conn: &Connection, cutoff_ts: i64) -> AppResult<usize> {
    conn.execute(
        "DELETE FROM attendance_marks
         WHERE attendance_id IN (SELECT id FROM attendance WHERE created_ts <= ?1)",
        [cutoff_ts],
    )?;
    let n = conn.execute("DELETE FROM attendance WHERE created_ts <= ?1", [cutoff_ts])?;
    Ok(n)
}
