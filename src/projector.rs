//! Projection of an input dataset onto the fixed output registry.
//!
//! Every output cell is resolved independently from the column's
//! [`ColumnSource`]: constants fill the column, blank columns stay empty and
//! sourced columns copy the matching input cell (matched by normalized
//! name). Unmatched sources degrade to blank cells, never errors. After
//! resolution the enforced rules overwrite `sender_state`, `lastmile` and
//! truncate `description`.

use std::collections::HashMap;

use log::debug;

use crate::{
    data::{Cell, InputDataset, OutputDataset, Value, cell_text},
    registry::{self, ColumnSource, ColumnSpec},
    transform::string_ops::{normalize_name, truncate_chars},
};

/// Normalized input header -> header position. When several headers
/// normalize to the same key the last one wins.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    positions: HashMap<String, usize>,
}

impl NameIndex {
    pub fn build(headers: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            if let Some(previous) = positions.insert(normalize_name(header), idx) {
                debug!(
                    "Header '{}' (column {}) shadows column {} with the same normalized name",
                    header,
                    idx + 1,
                    previous + 1
                );
            }
        }
        Self { positions }
    }

    /// Position of the input column matching `name` after normalization.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.positions.get(&normalize_name(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Resolves one output cell for one input row.
pub fn resolve(spec: &ColumnSpec, row: &[Cell], index: &NameIndex) -> Cell {
    match spec.source() {
        ColumnSource::Constant(value) => Some(Value::String(value.to_string())),
        ColumnSource::Blank => None,
        ColumnSource::Source(name) => index
            .lookup(name)
            .and_then(|position| row.get(position).cloned().flatten()),
    }
}

/// Column positions touched by the enforced rules, looked up once per
/// projection so a registry without one of them simply skips that rule.
#[derive(Debug, Clone, Copy)]
struct EnforcedColumns {
    sender_state: Option<usize>,
    lastmile: Option<usize>,
    description: Option<usize>,
}

impl EnforcedColumns {
    fn locate(columns: &[ColumnSpec]) -> Self {
        let find = |name: &str| columns.iter().position(|spec| spec.output_name == name);
        Self {
            sender_state: find(registry::SENDER_STATE_COLUMN),
            lastmile: find(registry::LASTMILE_COLUMN),
            description: find(registry::DESCRIPTION_COLUMN),
        }
    }
}

/// Applies the enforced rules to one projected row in place.
fn apply_enforced_rules(row: &mut [Cell], enforced: EnforcedColumns) {
    if let Some(idx) = enforced.sender_state {
        row[idx] = Some(Value::String(registry::SENDER_STATE_VALUE.to_string()));
    }
    if let Some(idx) = enforced.lastmile {
        row[idx] = Some(Value::String(registry::LASTMILE_VALUE.to_string()));
    }
    if let Some(idx) = enforced.description {
        let text = cell_text(&row[idx]);
        let truncated = truncate_chars(&text, registry::DESCRIPTION_MAX_CHARS).into_owned();
        row[idx] = Some(Value::String(truncated));
    }
}

/// Projects `input` onto the fixed registry.
pub fn project(input: &InputDataset) -> OutputDataset {
    project_with(registry::columns(), input)
}

/// Projects `input` onto an arbitrary column list; [`project`] uses the
/// fixed registry.
pub fn project_with(columns: &[ColumnSpec], input: &InputDataset) -> OutputDataset {
    let index = NameIndex::build(input.headers());
    let enforced = EnforcedColumns::locate(columns);
    let rows = input
        .rows()
        .iter()
        .map(|row| {
            let mut projected = columns
                .iter()
                .map(|spec| resolve(spec, row, &index))
                .collect::<Vec<_>>();
            apply_enforced_rules(&mut projected, enforced);
            projected
        })
        .collect();
    OutputDataset::from_rows(rows)
}

/// Source-name matching outcome for a set of input headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: Vec<&'static str>,
    pub unmatched: Vec<&'static str>,
}

/// Reports which sourced registry columns find an input header.
pub fn match_report(headers: &[String]) -> MatchReport {
    let index = NameIndex::build(headers);
    let mut report = MatchReport::default();
    for spec in registry::columns() {
        if let ColumnSource::Source(name) = spec.source() {
            if index.lookup(name).is_some() {
                report.matched.push(spec.output_name);
            } else {
                report.unmatched.push(spec.output_name);
            }
        }
    }
    report
}
