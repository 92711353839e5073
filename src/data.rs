//! Cell values and the tabular datasets exchanged with the projector.
//!
//! A cell is an `Option<Value>`: `None` is an absent or empty spreadsheet
//! cell. Typed values (numbers, booleans, dates) survive projection so the
//! workbook writer can emit them natively; [`Value::as_display`] is the text
//! form used for CSV output, previews and string rules.

use std::fmt;

use chrono::NaiveDateTime;

use crate::registry;

pub type Cell = Option<Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Builds a cell from raw delimited text; blank text is an absent cell.
    pub fn from_text(raw: &str) -> Cell {
        if raw.is_empty() {
            None
        } else {
            Some(Value::String(raw.to_string()))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Text form of a cell, `""` when absent.
pub fn cell_text(cell: &Cell) -> String {
    cell.as_ref().map(Value::as_display).unwrap_or_default()
}

/// Parsed first-sheet contents handed to the projector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDataset {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl InputDataset {
    /// Creates an empty dataset; header names are whitespace-trimmed.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| h.as_ref().trim().to_string())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row aligned to the headers, padding or truncating as needed.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projected rows, one cell per registry column in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDataset {
    rows: Vec<Vec<Cell>>,
}

impl OutputDataset {
    pub(crate) fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Canonical header row: every registry output name in position order.
    pub fn headers(&self) -> Vec<&'static str> {
        registry::output_names().collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, output_name: &str) -> Option<&Value> {
        let column = registry::column_index(output_name)?;
        self.rows.get(row)?.get(column)?.as_ref()
    }

    /// String view of one output cell; absent cells and unknown names are `""`.
    pub fn text(&self, row: usize, output_name: &str) -> String {
        self.value(row, output_name)
            .map(Value::as_display)
            .unwrap_or_default()
    }

    /// Rows rendered as text, for previews and delimited output.
    pub fn text_rows(&self, limit: Option<usize>) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}
