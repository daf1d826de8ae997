//! Formatting utilities used for CLI and export outputs.

use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern")
});

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Cut `s` to `max` characters, ending with "..." when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Text progress bar for a percentage, e.g. `[#######---] 67%`.
pub fn rate_bar(rate: u32, width: usize) -> String {
    let filled = (rate.min(100) as usize * width + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        rate
    )
}

/// "3 of 12" style progress label, 1-based.
pub fn progress(position: usize, total: usize) -> String {
    format!("{} of {}", (position + 1).min(total), total)
}
