//! Spreadsheet decoding and encoding.
//!
//! Input workbooks (`.xlsx`, `.xlsm`, `.xls`) are read with `calamine`: only
//! the first worksheet is used and its first row supplies the headers. The
//! export is written with `rust_xlsxwriter` as a single `HG AMS ACAS` sheet
//! with the canonical header row; numbers, booleans and dates keep their
//! native cell types.

use std::{fs, io, path::Path};

use calamine::{Data, Reader, open_workbook_auto};
use log::debug;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use thiserror::Error;

use crate::data::{Cell, InputDataset, OutputDataset, Value};

pub const OUTPUT_SHEET_NAME: &str = "HG AMS ACAS";
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::Error),
    #[error("workbook {0} contains no worksheets")]
    NoSheets(String),
    #[error("failed to build workbook: {0}")]
    Build(#[from] XlsxError),
    #[error("row {0} exceeds the worksheet row limit")]
    RowLimit(usize),
    #[error("failed to write workbook: {0}")]
    Io(#[from] io::Error),
}

fn convert_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(v) => Some(Value::Integer(*v)),
        Data::Float(v) => Some(Value::Float(*v)),
        Data::Bool(v) => Some(Value::Boolean(*v)),
        Data::DateTime(v) => v.as_datetime().map(Value::DateTime),
        other => Some(Value::String(other.to_string())),
    }
}

fn header_name(idx: usize, value: &Data) -> String {
    match convert_cell(value) {
        Some(cell) if !cell.as_display().trim().is_empty() => cell.as_display(),
        _ => format!("Unnamed: {idx}"),
    }
}

/// Reads the first worksheet of `path` into an [`InputDataset`].
pub fn read_workbook_dataset(path: &Path) -> Result<InputDataset, WorkbookError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| WorkbookError::NoSheets(path.display().to_string()))??;
    debug!(
        "Reading sheet '{}' ({} row(s) x {} column(s)) from {:?}",
        sheet_names.first().map(String::as_str).unwrap_or_default(),
        range.height(),
        range.width(),
        path
    );

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(InputDataset::default());
    };
    let mut dataset = InputDataset::new(
        header_row
            .iter()
            .enumerate()
            .map(|(idx, value)| header_name(idx, value)),
    );
    for row in rows {
        dataset.push_row(row.iter().map(convert_cell).collect());
    }
    Ok(dataset)
}

/// Serializes the export into xlsx bytes.
pub fn render_workbook(dataset: &OutputDataset) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET_NAME)?;
    for (col, name) in dataset.headers().into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, name, &header_format)?;
    }

    for (idx, row) in dataset.rows().iter().enumerate() {
        let row_num = RowNum::try_from(idx + 1).map_err(|_| WorkbookError::RowLimit(idx + 1))?;
        for (col, cell) in row.iter().enumerate() {
            let col = col as ColNum;
            match cell {
                None => {}
                Some(Value::String(s)) if s.is_empty() => {}
                Some(Value::String(s)) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Some(Value::Integer(v)) => {
                    worksheet.write_number(row_num, col, *v as f64)?;
                }
                Some(Value::Float(v)) => {
                    worksheet.write_number(row_num, col, *v)?;
                }
                Some(Value::Boolean(v)) => {
                    worksheet.write_boolean(row_num, col, *v)?;
                }
                Some(Value::DateTime(v)) => {
                    worksheet.write_datetime_with_format(row_num, col, v, &datetime_format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn write_workbook(path: &Path, dataset: &OutputDataset) -> Result<(), WorkbookError> {
    let bytes = render_workbook(dataset)?;
    fs::write(path, bytes)?;
    Ok(())
}
