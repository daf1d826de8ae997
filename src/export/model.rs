// src/export/model.rs

use crate::models::history::HistoryEntry;
use serde::Serialize;

/// Flat CSV row: one per marked student.
#[derive(Serialize, Clone, Debug)]
pub struct MarkExport {
    pub attendance_id: i64,
    pub created_at: String,
    pub subject: String,
    pub student_id: i64,
    pub roll_number: String,
    pub name: String,
    pub class: String,
    pub section: String,
    pub status: String,
    pub session_rate: u32,
}

/// Flatten sessions into CSV rows, keeping session then walk order.
pub(crate) fn flatten(entries: &[HistoryEntry]) -> Vec<MarkExport> {
    entries
        .iter()
        .flat_map(|e| {
            e.students.iter().map(move |m| MarkExport {
                attendance_id: e.id,
                created_at: e.created_at.clone(),
                subject: e.subject.clone(),
                student_id: m.student_id,
                roll_number: m.roll_number.clone(),
                name: m.name.clone(),
                class: m.class.clone(),
                section: m.section.clone(),
                status: m.status.to_db_str().to_string(),
                session_rate: e.aggregates.rate,
            })
        })
        .collect()
}
