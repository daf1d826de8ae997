//! Table rendering utilities for CLI outputs.
//! Widths are measured in terminal columns, so names with accents or
//! wide characters still line up.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    /// Use the first character of `sep` for the rule under the header.
    pub fn with_separator(mut self, sep: &str) -> Self {
        if let Some(c) = sep.chars().next() {
            self.separator = c;
        }
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column width grown to fit the widest cell.
    fn effective_width(&self, idx: usize) -> usize {
        let base = self.columns[idx].width.max(self.columns[idx].header.width());
        self.rows
            .iter()
            .filter_map(|r| r.get(idx))
            .map(|c| visible_width(c))
            .fold(base, usize::max)
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.columns.len())
            .map(|i| self.effective_width(i))
            .collect();

        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&col.header, *w));
            out.push(' ');
        }
        out.push('\n');

        let rule_len = widths.iter().sum::<usize>() + widths.len();
        out.push_str(&self.separator.to_string().repeat(rule_len));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, *w));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Display width ignoring ANSI colour sequences.
pub fn visible_width(s: &str) -> usize {
    super::formatting::strip_ansi(s).width()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(fill))
}
