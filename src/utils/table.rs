//! Table rendering utilities for CLI outputs.

use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    /// Upper bound for the column; longer cells are cut with `…`.
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    rows: Vec<(Vec<String>, Option<Colour>)>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Row painted in a single colour (status highlighting).
    pub fn add_coloured_row(&mut self, row: Vec<String>, colour: Option<Colour>) {
        self.rows.push((row, colour));
    }

    /// Column widths: widest cell (display width), capped by `max_width`.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|(r, _)| r.get(i))
                    .map(|c| c.width())
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        out.push_str(&render_line(&header, &widths));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');

        for (row, colour) in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            let line = render_line(&cells, &widths);
            match colour {
                Some(c) => out.push_str(&c.paint(line).to_string()),
                None => out.push_str(&line),
            }
            out.push('\n');
        }

        out
    }
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| pad(cells.get(i).copied().unwrap_or(""), *w))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Fit `s` into exactly `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let mut text = s.to_string();
    if text.width() > width {
        text.clear();
        for c in s.chars() {
            if text.width() + c.to_string().width() + 1 > width {
                break;
            }
            text.push(c);
        }
        text.push('…');
    }
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_cut_to_the_column_width() {
        let mut t = Table::new(vec![Column::new("ID", 4), Column::new("NAME", 6)]);
        t.add_coloured_row(vec!["1".into(), "Notebook Dell".into()], None);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID NAME");
        assert_eq!(lines[1], "-- ------");
        assert_eq!(lines[2], "1  Noteb…");
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        assert_eq!(pad("日本", 5), "日本 ");
    }
}
