use crate::errors::{AppError, AppResult};
use crate::models::gender::Gender;
use crate::models::student::{NewStudent, Student};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Student> {
    let gender_str: String = row.get("gender")?;
    let gender = Gender::from_db_str(&gender_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!("Invalid gender: {}", gender_str))),
        )
    })?;

    Ok(Student {
        id: row.get("id")?,
        teacher_id: row.get("teacher_id")?,
        name: row.get("name")?,
        roll_number: row.get("roll_number")?,
        class: row.get("class")?,
        section: row.get("section")?,
        age: row.get("age")?,
        gender,
        photo: row.get("photo")?,
        created_at: row.get("created_at")?,
    })
}

/// Map a UNIQUE(teacher_id, roll_number) violation to `DuplicateKey`.
fn unique_violation(e: rusqlite::Error, roll_number: &str) -> AppError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AppError::DuplicateKey(format!(
                "a student with roll number '{}' already exists",
                roll_number
            ))
        }
        other => AppError::Db(other),
    }
}

pub fn roll_number_taken(
    conn: &Connection,
    teacher_id: i64,
    roll_number: &str,
    except_id: Option<i64>,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM students
         WHERE teacher_id = ?1 AND roll_number = ?2 AND id != ?3
         LIMIT 1",
    )?;
    Ok(stmt.exists(params![teacher_id, roll_number, except_id.unwrap_or(-1)])?)
}

pub fn insert_student(conn: &Connection, teacher_id: i64, st: &NewStudent) -> AppResult<Student> {
    conn.execute(
        "INSERT INTO students (teacher_id, name, roll_number, class, section, age, gender, photo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            teacher_id,
            st.name,
            st.roll_number,
            st.class,
            st.section,
            st.age,
            st.gender.to_db_str(),
            st.photo,
            st.created_at,
        ],
    )
    .map_err(|e| unique_violation(e, &st.roll_number))?;

    Ok(Student {
        id: conn.last_insert_rowid(),
        teacher_id,
        name: st.name.clone(),
        roll_number: st.roll_number.clone(),
        class: st.class.clone(),
        section: st.section.clone(),
        age: st.age,
        gender: st.gender,
        photo: st.photo.clone(),
        created_at: st.created_at.clone(),
    })
}

/// All students of a teacher in creation order.
pub fn load_students(conn: &Connection, teacher_id: i64) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM students
         WHERE teacher_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([teacher_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_student(conn: &Connection, teacher_id: i64, id: i64) -> AppResult<Option<Student>> {
    let st = conn
        .query_row(
            "SELECT * FROM students WHERE id = ?1 AND teacher_id = ?2",
            params![id, teacher_id],
            map_row,
        )
        .optional()?;
    Ok(st)
}

/// Update a student (all fields except id, owner and creation time)
pub fn update_student(conn: &Connection, st: &Student) -> AppResult<()> {
    conn.execute(
        "UPDATE students
         SET name = ?1, roll_number = ?2, class = ?3,
             section = ?4, age = ?5, gender = ?6, photo = ?7
         WHERE id = ?8 AND teacher_id = ?9",
        params![
            st.name,
            st.roll_number,
            st.class,
            st.section,
            st.age,
            st.gender.to_db_str(),
            st.photo,
            st.id,
            st.teacher_id,
        ],
    )
    .map_err(|e| unique_violation(e, &st.roll_number))?;
    Ok(())
}

/// Returns the number of deleted rows (0 or 1).
pub fn delete_student(conn: &Connection, teacher_id: i64, id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM students WHERE id = ?1 AND teacher_id = ?2",
        params![id, teacher_id],
    )?;
    Ok(n)
}

pub fn count_students(conn: &Connection, teacher_id: i64) -> AppResult<u32> {
    let n: u32 = conn.query_row(
        "SELECT COUNT(*) FROM students WHERE teacher_id = ?1",
        [teacher_id],
        |row| row.get(0),
    )?;
    Ok(n)
}
