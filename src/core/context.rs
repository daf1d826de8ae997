use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::teachers;
use crate::errors::{AppError, AppResult};
use crate::models::teacher::{ActiveContext, Teacher};

/// Who is taking attendance, and for which subject.
pub struct ContextLogic;

fn clean(field: &str, value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(v.to_string())
}

impl ContextLogic {
    /// Quick login: find the teacher by name (or create it) and make
    /// `(teacher, subject)` the active context. The subject is added to the
    /// teacher's list when new.
    pub fn login(pool: &mut DbPool, name: &str, subject: &str) -> AppResult<ActiveContext> {
        let name = clean("name", name)?;
        let subject = clean("subject", subject)?;
        let email = Teacher::email_for(&name);

        let teacher = match teachers::find_by_email(&pool.conn, &email)? {
            Some(mut t) => {
                if !t.teaches(&subject) {
                    t.subjects.push(subject.clone());
                    teachers::update_subjects(&pool.conn, t.id, &t.subjects)?;
                }
                t
            }
            None => {
                let t = teachers::insert_teacher(
                    &pool.conn,
                    &name,
                    &email,
                    std::slice::from_ref(&subject),
                )?;
                ttlog_soft(&pool.conn, "register", &email, &format!("Created teacher {}", name));
                t
            }
        };

        teachers::save_context(&pool.conn, teacher.id, &subject)?;
        ttlog_soft(
            &pool.conn,
            "login",
            &teacher.email,
            &format!("Logged in for {}", subject),
        );

        Ok(ActiveContext { teacher, subject })
    }

    /// Returns false when nobody was logged in.
    pub fn logout(pool: &mut DbPool) -> AppResult<bool> {
        let was_active = teachers::clear_context(&pool.conn)?;
        if was_active {
            ttlog_soft(&pool.conn, "logout", "", "Session context cleared");
        }
        Ok(was_active)
    }

    pub fn current(pool: &mut DbPool) -> AppResult<Option<ActiveContext>> {
        let Some((teacher_id, subject)) = teachers::load_context(&pool.conn)? else {
            return Ok(None);
        };

        let teacher = teachers::find_by_id(&pool.conn, teacher_id)?
            .ok_or_else(|| AppError::NotFound(format!("teacher {}", teacher_id)))?;

        Ok(Some(ActiveContext { teacher, subject }))
    }

    /// Like [`ContextLogic::current`], but a missing login is an error.
    pub fn require(pool: &mut DbPool) -> AppResult<ActiveContext> {
        Self::current(pool)?.ok_or(AppError::NotLoggedIn)
    }

    /// Switch the active subject. Unknown subjects are rejected unless
    /// `add` is set, in which case they join the teacher's list.
    pub fn switch_subject(pool: &mut DbPool, subject: &str, add: bool) -> AppResult<ActiveContext> {
        let subject = clean("subject", subject)?;
        let mut ctx = Self::require(pool)?;

        if !ctx.teacher.teaches(&subject) {
            if !add {
                return Err(AppError::Validation(format!(
                    "'{}' is not one of your subjects ({}); use --add to add it",
                    subject,
                    ctx.teacher.subjects.join(", ")
                )));
            }
            ctx.teacher.subjects.push(subject.clone());
            teachers::update_subjects(&pool.conn, ctx.teacher.id, &ctx.teacher.subjects)?;
        }

        teachers::save_context(&pool.conn, ctx.teacher.id, &subject)?;
        ttlog_soft(
            &pool.conn,
            "subject",
            &ctx.teacher.email,
            &format!("Switched to {}", subject),
        );

        ctx.subject = subject;
        Ok(ctx)
    }
}
