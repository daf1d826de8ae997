use crate::errors::{AppError, AppResult};
use crate::models::teacher::Teacher;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Teacher> {
    let subjects_raw: String = row.get("subjects")?;
    let subjects: Vec<String> = serde_json::from_str(&subjects_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Teacher {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        subjects,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<Option<Teacher>> {
    let t = conn
        .query_row(
            "SELECT * FROM teachers WHERE email = ?1",
            [email],
            map_row,
        )
        .optional()?;
    Ok(t)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Teacher>> {
    let t = conn
        .query_row("SELECT * FROM teachers WHERE id = ?1", [id], map_row)
        .optional()?;
    Ok(t)
}

pub fn insert_teacher(
    conn: &Connection,
    name: &str,
    email: &str,
    subjects: &[String],
) -> AppResult<Teacher> {
    let created_at = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO teachers (name, email, subjects, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, email, serde_json::to_string(subjects)?, created_at],
    )?;

    Ok(Teacher {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        subjects: subjects.to_vec(),
        created_at,
    })
}

pub fn update_subjects(conn: &Connection, teacher_id: i64, subjects: &[String]) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE teachers SET subjects = ?1 WHERE id = ?2",
        params![serde_json::to_string(subjects)?, teacher_id],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("teacher {}", teacher_id)));
    }
    Ok(())
}

/// Active (teacher_id, subject), if someone is logged in.
pub fn load_context(conn: &Connection) -> AppResult<Option<(i64, String)>> {
    let ctx = conn
        .query_row(
            "SELECT teacher_id, subject FROM context WHERE id = 1",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;
    Ok(ctx)
}

pub fn save_context(conn: &Connection, teacher_id: i64, subject: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO context (id, teacher_id, subject, updated_at)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             teacher_id = excluded.teacher_id,
             subject    = excluded.subject,
             updated_at = excluded.updated_at",
        params![teacher_id, subject, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn clear_context(conn: &Connection) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM context WHERE id = 1", [])?;
    Ok(n > 0)
}
