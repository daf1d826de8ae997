use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD` or the words `today` / `yesterday`.
pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today()),
        "yesterday" => today()
            .pred_opt()
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        _ => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// First and last millisecond of a local calendar day.
pub fn day_bounds(date: NaiveDate) -> AppResult<(DateTime<Local>, DateTime<Local>)> {
    let start = date.and_time(NaiveTime::MIN);
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

    let start = Local
        .from_local_datetime(&start)
        .earliest()
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
    let end = Local
        .from_local_datetime(&end)
        .latest()
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

    Ok((start, end))
}

/// Instant at or before which a record created `days` ago is expired.
pub fn retention_cutoff(now: DateTime<Local>, days: i64) -> AppResult<DateTime<Local>> {
    if days < 1 {
        return Err(AppError::Config(format!(
            "retention window must be at least 1 day (found {})",
            days
        )));
    }
    Duration::try_days(days)
        .and_then(|d| now.checked_sub_signed(d))
        .ok_or_else(|| AppError::Config(format!("retention window of {} days is too large", days)))
}

/// "2025-10-06 09:41" from an RFC 3339 string; the input as-is if it does not parse.
pub fn short_timestamp(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}
