use super::session::Aggregates;
use super::status::AttendanceStatus;
use serde::Serialize;

/// A decision as persisted, with the student fields copied at save time.
#[derive(Debug, Clone, Serialize)]
pub struct MarkedStudent {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    pub class: String,
    pub section: String,
    pub status: AttendanceStatus,
}

/// A finalized, read-only attendance session.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub started_at: String,  // ⇔ attendance.started_at (RFC 3339)
    pub created_at: String,  // ⇔ attendance.created_at (RFC 3339)
    pub created_ts: i64,     // ⇔ attendance.created_ts (unix millis)
    #[serde(flatten)]
    pub aggregates: Aggregates,
    pub students: Vec<MarkedStudent>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(total: u32, page: u32, limit: u32) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub pagination: Pagination,
}

/// Teacher dashboard numbers.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_students: u32,
    pub total_records: u32,
    pub average_rate_7d: u32,
    pub recent: Vec<HistoryEntry>,
}
