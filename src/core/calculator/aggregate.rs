use crate::models::session::{Aggregates, Decision};

/// Reduce a decision list over a roster of `roster_size` students.
///
/// `total` is the roster size, not the number of decisions: for a finished
/// walk the two are equal.
pub fn aggregate(decisions: &[Decision], roster_size: usize) -> Aggregates {
    let present = decisions.iter().filter(|d| d.status.is_present()).count() as u32;
    let absent = decisions.len() as u32 - present;
    let total = roster_size as u32;

    Aggregates {
        total,
        present,
        absent,
        rate: round_percent(present as u64, total as u64),
    }
}

/// `round(part * 100 / whole)` with halves rounded up; 0 when `whole` is 0.
pub fn round_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (2 * whole)) as u32
}

/// Arithmetic mean of percentages, rounded half up; 0 for an empty slice.
pub fn average_rate(rates: &[u32]) -> u32 {
    if rates.is_empty() {
        return 0;
    }
    let sum: u64 = rates.iter().map(|r| *r as u64).sum();
    let n = rates.len() as u64;
    ((sum * 2 + n) / (2 * n)) as u32
}
