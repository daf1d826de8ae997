/// ANSI color helper utilities for terminal output.
use crate::models::status::AttendanceStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Rate color:
/// \>=75 → green
/// \>=50 → yellow
/// below → red
pub fn color_for_rate(rate: u32) -> &'static str {
    if rate >= 75 {
        GREEN
    } else if rate >= 50 {
        YELLOW
    } else {
        RED
    }
}

pub fn colorize_rate(rate: u32) -> String {
    format!("{}{}%{}", color_for_rate(rate), rate, RESET)
}

pub fn colorize_status(status: AttendanceStatus) -> String {
    match status {
        AttendanceStatus::Present => format!("{GREEN}present{RESET}"),
        AttendanceStatus::Absent => format!("{RED}absent{RESET}"),
    }
}
