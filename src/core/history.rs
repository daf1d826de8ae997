//! Finalized sessions: persistence, paginated lookup and retention.
//!
//! Visibility is decided at query time (anything created more than
//! `retention_days` ago is filtered out) and a sweep deletes the expired
//! rows for good after each save or on `history purge`.

use crate::config::Config;
use crate::core::calculator::aggregate::aggregate;
use crate::db::attendance::{self, HistoryFilter};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::history::{HistoryEntry, HistoryPage, MarkedStudent, Pagination};
use crate::models::session::CompletedSession;
use crate::utils::date::{day_bounds, retention_cutoff};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::HashSet;

pub const DEFAULT_RETENTION_DAYS: i64 = 30;
/// Ten years; anything longer is treated as a configuration mistake.
pub const MAX_RETENTION_DAYS: i64 = 3650;

/// What to look up. `subject: None` spans every subject of the teacher.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub subject: Option<String>,
    pub date: Option<NaiveDate>,
    pub page: u32,
    pub limit: u32,
}

impl HistoryQuery {
    pub fn new(subject: Option<&str>, page: u32, limit: u32) -> Self {
        Self {
            subject: subject.map(str::to_string),
            date: None,
            page,
            limit,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

pub struct HistoryStore {
    retention_days: i64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}

impl HistoryStore {
    pub fn new(retention_days: i64) -> Self {
        Self { retention_days }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.retention_days)
    }

    pub fn retention_days(&self) -> i64 {
        self.retention_days
    }

    /// Filter for everything still visible at `now`.
    pub fn visible(
        &self,
        teacher_id: i64,
        subject: Option<&str>,
        now: DateTime<Local>,
    ) -> AppResult<HistoryFilter> {
        Ok(HistoryFilter {
            teacher_id,
            subject: subject.map(str::to_string),
            created_between: None,
            expired_at_or_before: retention_cutoff(now, self.retention_days)?.timestamp_millis(),
        })
    }

    /// Persist a finished session, then sweep expired rows.
    pub fn save(
        &self,
        pool: &mut DbPool,
        teacher_id: i64,
        session: &CompletedSession,
    ) -> AppResult<HistoryEntry> {
        let now = Local::now();
        let entry = self.save_at(pool, teacher_id, session, now)?;
        self.purge_at(pool, now)?;
        Ok(entry)
    }

    /// Persist a finished session with an explicit creation time.
    pub fn save_at(
        &self,
        pool: &mut DbPool,
        teacher_id: i64,
        session: &CompletedSession,
        created_at: DateTime<Local>,
    ) -> AppResult<HistoryEntry> {
        let students = check_session(session)?;
        // fail before writing when the retention window is unusable
        retention_cutoff(created_at, self.retention_days)?;

        let mut entry = HistoryEntry {
            id: 0,
            teacher_id,
            subject: session.subject.clone(),
            started_at: session.started_at.to_rfc3339(),
            created_at: created_at.to_rfc3339(),
            created_ts: created_at.timestamp_millis(),
            // recomputed, the caller's copy is not trusted
            aggregates: aggregate(&session.decisions, session.roster.len()),
            students,
        };

        let id = pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            let id = attendance::insert_attendance(&tx, &entry)?;
            tx.commit()?;
            Ok(id)
        })?;
        entry.id = id;

        ttlog_soft(
            &pool.conn,
            "attendance",
            &entry.id.to_string(),
            &format!(
                "Saved {} session: {}/{} present ({}%)",
                entry.subject, entry.aggregates.present, entry.aggregates.total, entry.aggregates.rate
            ),
        );

        Ok(entry)
    }

    pub fn query(
        &self,
        pool: &mut DbPool,
        teacher_id: i64,
        q: &HistoryQuery,
    ) -> AppResult<HistoryPage> {
        self.query_at(pool, teacher_id, q, Local::now())
    }

    /// Newest-first page of visible entries as seen at `now`.
    ///
    /// A page past the end is not an error: it comes back empty with the
    /// same totals.
    pub fn query_at(
        &self,
        pool: &mut DbPool,
        teacher_id: i64,
        q: &HistoryQuery,
        now: DateTime<Local>,
    ) -> AppResult<HistoryPage> {
        if q.page == 0 {
            return Err(AppError::Validation("page must be 1 or greater".into()));
        }
        if q.limit == 0 {
            return Err(AppError::Validation("limit must be 1 or greater".into()));
        }

        let mut filter = self.visible(teacher_id, q.subject.as_deref(), now)?;
        if let Some(d) = q.date {
            let (start, end) = day_bounds(d)?;
            filter.created_between = Some((start.timestamp_millis(), end.timestamp_millis()));
        }

        let total = attendance::count_attendance(&pool.conn, &filter)?;
        let pagination = Pagination::new(total, q.page, q.limit);

        let entries = if pagination.offset() >= total as u64 {
            Vec::new()
        } else {
            attendance::load_attendance_page(&pool.conn, &filter, q.limit, pagination.offset())?
        };

        Ok(HistoryPage {
            entries,
            pagination,
        })
    }

    pub fn get(&self, pool: &mut DbPool, teacher_id: i64, id: i64) -> AppResult<HistoryEntry> {
        self.get_at(pool, teacher_id, id, Local::now())
    }

    pub fn get_at(
        &self,
        pool: &mut DbPool,
        teacher_id: i64,
        id: i64,
        now: DateTime<Local>,
    ) -> AppResult<HistoryEntry> {
        let cutoff = retention_cutoff(now, self.retention_days)?.timestamp_millis();
        attendance::load_attendance(&pool.conn, teacher_id, id, cutoff)?
            .ok_or_else(|| AppError::NotFound(format!("attendance record {}", id)))
    }

    pub fn purge(&self, pool: &mut DbPool) -> AppResult<usize> {
        self.purge_at(pool, Local::now())
    }

    /// Delete every entry (all teachers) that is expired at `now`.
    pub fn purge_at(&self, pool: &mut DbPool, now: DateTime<Local>) -> AppResult<usize> {
        let cutoff = retention_cutoff(now, self.retention_days)?;
        let n = attendance::delete_expired(&pool.conn, cutoff.timestamp_millis())?;

        if n > 0 {
            ttlog_soft(
                &pool.conn,
                "purge",
                &cutoff.to_rfc3339(),
                &format!("Removed {} expired attendance records", n),
            );
        }

        Ok(n)
    }
}

/// Validate a session and snapshot the marked students, in walk order.
fn check_session(session: &CompletedSession) -> AppResult<Vec<MarkedStudent>> {
    if session.subject.trim().is_empty() {
        return Err(AppError::Validation("subject must not be empty".into()));
    }
    if session.decisions.len() > session.roster.len() {
        return Err(AppError::Validation(format!(
            "{} decisions for a roster of {}",
            session.decisions.len(),
            session.roster.len()
        )));
    }

    let mut seen = HashSet::with_capacity(session.decisions.len());
    let mut out = Vec::with_capacity(session.decisions.len());

    for d in &session.decisions {
        if !seen.insert(d.student_id) {
            return Err(AppError::Validation(format!(
                "student {} marked more than once",
                d.student_id
            )));
        }

        let st = session
            .roster
            .iter()
            .find(|s| s.id == d.student_id)
            .ok_or_else(|| {
                AppError::Validation(format!("student {} is not on the roster", d.student_id))
            })?;

        out.push(MarkedStudent {
            student_id: st.id,
            name: st.name.clone(),
            roll_number: st.roll_number.clone(),
            class: st.class.clone(),
            section: st.section.clone(),
            status: d.status,
        });
    }

    Ok(out)
}
