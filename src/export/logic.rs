// src/export/logic.rs

use crate::core::history::{HistoryQuery, HistoryStore};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::models::history::HistoryEntry;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

const EXPORT_PAGE: u32 = 100;

pub struct ExportLogic;

impl ExportLogic {
    /// Export of every visible history entry matching `subject` / `date`.
    /// Returns the number of sessions written.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        store: &HistoryStore,
        teacher_id: i64,
        subject: Option<&str>,
        date: Option<NaiveDate>,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        let entries = load_all(pool, store, teacher_id, subject, date)?;

        if entries.is_empty() {
            warning("No attendance records found for the selected filter.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&entries, path)?,
            ExportFormat::Json => export_json(&entries, path)?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} records as {}", entries.len(), format.as_str()),
        );

        Ok(entries.len())
    }
}

/// Walk every page of the query, newest first.
fn load_all(
    pool: &mut DbPool,
    store: &HistoryStore,
    teacher_id: i64,
    subject: Option<&str>,
    date: Option<NaiveDate>,
) -> AppResult<Vec<HistoryEntry>> {
    let mut out = Vec::new();
    let mut page = 1;

    loop {
        let mut q = HistoryQuery::new(subject, page, EXPORT_PAGE);
        if let Some(d) = date {
            q = q.on(d);
        }

        let res = store.query(pool, teacher_id, &q)?;
        out.extend(res.entries);

        if page >= res.pagination.total_pages {
            break;
        }
        page += 1;
    }

    Ok(out)
}
