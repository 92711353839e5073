//! Terminal preview of projected rows.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::data::OutputDataset;

/// Cells wider than this are shortened with a trailing ellipsis.
pub const MAX_CELL_WIDTH: usize = 32;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let headers = headers.iter().map(|h| fit_cell(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| fit_cell(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }
    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&headers, &widths));
    let separator = widths
        .iter()
        .map(|w| Cow::Owned("-".repeat(*w)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths));
    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

/// Renders the first `limit` rows of the export under its canonical headers.
pub fn render_preview(dataset: &OutputDataset, limit: usize) -> String {
    let headers = dataset
        .headers()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    render_table(&headers, &dataset.text_rows(Some(limit)))
}

pub fn print_preview(dataset: &OutputDataset, limit: usize) {
    print!("{}", render_preview(dataset, limit));
}

fn format_row(values: &[Cow<'_, str>], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let padding = width.saturating_sub(display_width(value));
            format!("{value}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn fit_cell(value: &str) -> Cow<'_, str> {
    let sanitized = if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    };
    if display_width(&sanitized) <= MAX_CELL_WIDTH {
        return sanitized;
    }
    let mut shortened = sanitized
        .chars()
        .take(MAX_CELL_WIDTH - 1)
        .collect::<String>();
    shortened.push('…');
    Cow::Owned(shortened)
}
