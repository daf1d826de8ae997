use super::status::AttendanceStatus;
use super::student::Student;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One mark for one roster entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Decision {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

/// Session-level counts. Always derived from a decision list, never edited.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Aggregates {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub rate: u32, // percent, 0..=100
}

/// A walk that reached the end of its roster, ready to be persisted.
#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub subject: String,
    pub started_at: DateTime<Local>,
    pub roster: Vec<Student>,
    pub decisions: Vec<Decision>,
    pub aggregates: Aggregates,
}
