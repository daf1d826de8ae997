use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::students;
use crate::errors::{AppError, AppResult};
use crate::models::student::{NewStudent, Student, StudentPatch};
use crate::models::teacher::Teacher;

/// The students a teacher takes attendance for.
pub struct RosterStore;

impl RosterStore {
    /// Roster for `subject`, in creation order (the walk order).
    pub fn list(pool: &mut DbPool, teacher: &Teacher, subject: &str) -> AppResult<Vec<Student>> {
        if !teacher.teaches(subject) {
            return Err(AppError::Validation(format!(
                "{} does not teach '{}'",
                teacher.name, subject
            )));
        }
        students::load_students(&pool.conn, teacher.id)
    }

    pub fn add(pool: &mut DbPool, teacher_id: i64, student: &NewStudent) -> AppResult<Student> {
        if students::roll_number_taken(&pool.conn, teacher_id, &student.roll_number, None)? {
            return Err(AppError::DuplicateKey(format!(
                "a student with roll number '{}' already exists",
                student.roll_number
            )));
        }

        let st = students::insert_student(&pool.conn, teacher_id, student)?;

        ttlog_soft(
            &pool.conn,
            "add",
            &st.roll_number,
            &format!("Added student {} (id {})", st.name, st.id),
        );

        Ok(st)
    }

    pub fn get(pool: &mut DbPool, teacher_id: i64, student_id: i64) -> AppResult<Student> {
        students::load_student(&pool.conn, teacher_id, student_id)?
            .ok_or_else(|| AppError::NotFound(format!("student {}", student_id)))
    }

    pub fn update(
        pool: &mut DbPool,
        teacher_id: i64,
        student_id: i64,
        patch: &StudentPatch,
    ) -> AppResult<Student> {
        if patch.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }

        let current = Self::get(pool, teacher_id, student_id)?;
        let updated = patch.apply_to(&current)?;

        if updated.roll_number != current.roll_number
            && students::roll_number_taken(
                &pool.conn,
                teacher_id,
                &updated.roll_number,
                Some(student_id),
            )?
        {
            return Err(AppError::DuplicateKey(format!(
                "a student with roll number '{}' already exists",
                updated.roll_number
            )));
        }

        students::update_student(&pool.conn, &updated)?;

        ttlog_soft(
            &pool.conn,
            "edit",
            &updated.roll_number,
            &format!("Updated student {} (id {})", updated.name, updated.id),
        );

        Ok(updated)
    }

    pub fn remove(pool: &mut DbPool, teacher_id: i64, student_id: i64) -> AppResult<()> {
        let st = Self::get(pool, teacher_id, student_id)?;

        if students::delete_student(&pool.conn, teacher_id, student_id)? == 0 {
            return Err(AppError::NotFound(format!("student {}", student_id)));
        }

        ttlog_soft(
            &pool.conn,
            "del",
            &st.roll_number,
            &format!("Removed student {} (id {})", st.name, st.id),
        );

        Ok(())
    }

    pub fn count(pool: &mut DbPool, teacher_id: i64) -> AppResult<u32> {
        students::count_students(&pool.conn, teacher_id)
    }
}
