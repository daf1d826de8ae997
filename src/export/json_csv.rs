// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::flatten;
use crate::export::notify_export_success;
use crate::models::history::HistoryEntry;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: full sessions with their marks.
pub(crate) fn export_json(entries: &[HistoryEntry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(entries)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, entries.len());
    Ok(())
}

/// Export CSV, header row taken from the serde field names.
pub(crate) fn export_csv(entries: &[HistoryEntry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    for row in flatten(entries) {
        wtr.serialize(row)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path, entries.len());
    Ok(())
}
