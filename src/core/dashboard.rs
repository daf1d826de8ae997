use crate::core::calculator::aggregate::average_rate;
use crate::core::history::{HistoryQuery, HistoryStore};
use crate::core::roster::RosterStore;
use crate::db::attendance;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::history::DashboardStats;
use chrono::{DateTime, Duration, Local};

pub const RECENT_RECORDS: u32 = 5;
pub const WEEK_DAYS: i64 = 7;

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn stats(store: &HistoryStore, pool: &mut DbPool, teacher_id: i64) -> AppResult<DashboardStats> {
        Self::stats_at(store, pool, teacher_id, Local::now())
    }

    /// Totals across every subject of the teacher, as seen at `now`.
    pub fn stats_at(
        store: &HistoryStore,
        pool: &mut DbPool,
        teacher_id: i64,
        now: DateTime<Local>,
    ) -> AppResult<DashboardStats> {
        let total_students = RosterStore::count(pool, teacher_id)?;

        let recent_page = store.query_at(
            pool,
            teacher_id,
            &HistoryQuery::new(None, 1, RECENT_RECORDS),
            now,
        )?;

        let week_ago = (now - Duration::days(WEEK_DAYS)).timestamp_millis();
        let rates = attendance::rates_since(&pool.conn, &store.visible(teacher_id, None, now)?, week_ago)?;

        Ok(DashboardStats {
            total_students,
            total_records: recent_page.pagination.total,
            average_rate_7d: average_rate(&rates),
            recent: recent_page.entries,
        })
    }
}
