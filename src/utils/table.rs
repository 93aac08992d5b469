//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|h| Column {
                    header: h.to_string(),
                    width: h.width(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row, widening columns to fit its display width.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(cell.width());
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Left-align by display width; `format!` pads by char count, which is wrong
/// for wide glyphs in user names.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_widest_cell() {
        let mut t = Table::new(&["ID", "User"]);
        t.add_row(vec!["1".into(), "Alice".into()]);
        t.add_row(vec!["2".into(), "山田太郎".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        // "山田太郎" is 8 columns wide.
        assert!(lines[0].starts_with("ID User    "));
        assert!(lines[2].starts_with("1  Alice   "));
    }
}
