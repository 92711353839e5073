#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a single-sheet workbook; numeric-looking cells become numbers.
    pub fn write_workbook(&self, name: &str, headers: &[&str], rows: &[Vec<&str>]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *header)
                .expect("write header");
        }
        for (idx, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                let (r, c) = (idx as u32 + 1, col as u16);
                if cell.is_empty() {
                    continue;
                }
                match cell.parse::<f64>() {
                    Ok(number) => sheet.write_number(r, c, number).expect("write number"),
                    Err(_) => sheet.write_string(r, c, *cell).expect("write string"),
                };
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

/// Reads the first sheet of a workbook as text rows, header row included.
pub fn read_workbook_rows(path: &Path) -> (String, Vec<Vec<String>>) {
    let mut workbook = open_workbook_auto(path).expect("open output workbook");
    let sheet_name = workbook.sheet_names()[0].clone();
    let range = workbook
        .worksheet_range_at(0)
        .expect("first sheet")
        .expect("read first sheet");
    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    (sheet_name, rows)
}

/// Index of an output column inside a header row.
pub fn column(headers: &[String], name: &str) -> usize {
    headers
        .iter()
        .position(|header| header == name)
        .unwrap_or_else(|| panic!("missing column {name}"))
}
