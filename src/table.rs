//! Plain-text rendering of a result table for terminal previews.

use std::fmt::Write as _;

use crate::{assemble::ResultTable, data::CellValue};

const SEPARATOR: &str = "  ";

pub fn render_table(table: &ResultTable) -> String {
    render_rows(&table.headers(), &table.rows())
}

pub fn render_rows(headers: &[String], rows: &[Vec<CellValue>]) -> String {
    let mut widths = headers
        .iter()
        .map(|h| h.chars().count().max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(single_line(&cell.as_display()).chars().count());
        }
    }

    let mut output = String::new();
    let header_cells = headers
        .iter()
        .map(|h| CellValue::Text(h.clone()))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&header_cells, &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", rule.join(SEPARATOR));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(table: &ResultTable) {
    print!("{}", render_table(table));
}

/// Text is left-aligned, numbers right-aligned.
fn format_row(values: &[CellValue], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let text = single_line(&value.as_display());
            match value {
                CellValue::Number(_) => format!("{text:>width$}"),
                CellValue::Text(_) => format!("{text:<width$}"),
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    line.trim_end().to_string()
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect()
}
