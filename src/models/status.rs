use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Outcome of one swipe: a student is either present or absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Parse user input: `present`/`absent` or the one-letter `p`/`a`, any case.
    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "p" | "present" => Ok(AttendanceStatus::Present),
            "a" | "absent" => Ok(AttendanceStatus::Absent),
            other => Err(AppError::Validation(format!(
                "unknown attendance status '{}' (expected present or absent)",
                other
            ))),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}
