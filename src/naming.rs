//! Output file naming.
//!
//! The export is named after the numeric shipment identifier at the start of
//! the uploaded file name (`180-50508754 HG.xlsx` -> `180-50508754 - HG AMS
//! ACAS.xlsx`). Names without such an identifier keep their whole base name.

use std::sync::OnceLock;

use regex::Regex;

pub const OUTPUT_SUFFIX: &str = " - HG AMS ACAS.xlsx";
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

static EXTENSION: OnceLock<Regex> = OnceLock::new();
static PREFIX: OnceLock<Regex> = OnceLock::new();

fn extension_pattern() -> &'static Regex {
    EXTENSION.get_or_init(|| Regex::new(r"(?i)\.xlsx?$").expect("valid extension pattern"))
}

fn prefix_pattern() -> &'static Regex {
    // Bare digits match too; dash-separated segments are the usual shape.
    PREFIX.get_or_init(|| Regex::new(r"^\d+(?:-\d+)*").expect("valid prefix pattern"))
}

/// Base name with a trailing `.xlsx`/`.xls` removed and whitespace trimmed.
pub fn strip_workbook_extension(filename: &str) -> &str {
    let base = match extension_pattern().find(filename) {
        Some(found) => &filename[..found.start()],
        None => filename,
    };
    base.trim()
}

/// Leading numeric identifier of `filename`, or its whole stripped base name.
pub fn extract_prefix(filename: &str) -> &str {
    let base = strip_workbook_extension(filename);
    prefix_pattern()
        .find(base)
        .map(|found| found.as_str())
        .unwrap_or(base)
}

pub fn derive_output_name(filename: &str) -> String {
    format!("{}{OUTPUT_SUFFIX}", extract_prefix(filename))
}
