//! Delimited-text input and output for the converter.
//!
//! Workbook files go through [`crate::workbook`]; every other input is read
//! here as delimited text:
//!
//! - **Format detection**: `.xlsx`/`.xlsm`/`.xls` are workbooks, anything else
//!   is delimited text.
//! - **Delimiter resolution**: `.tsv` → tab, otherwise comma, with manual
//!   override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **Quoting**: CSV output uses `QuoteStyle::Always`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::data::{InputDataset, OutputDataset, Value};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Delimited,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext)
                if ["xlsx", "xlsm", "xls"]
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known)) =>
            {
                InputFormat::Workbook
            }
            _ => InputFormat::Delimited,
        }
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Ragged rows are accepted; [`InputDataset::push_row`] aligns them.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path, delimiter: u8) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = Box::new(BufReader::new(
        File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
    ));
    Ok(open_csv_reader(reader, delimiter))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Reads a delimited file into an [`InputDataset`]; empty fields become
/// absent cells.
pub fn read_delimited_dataset(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<InputDataset> {
    let mut reader = open_csv_reader_from_path(path, delimiter)?;
    let headers = reader
        .byte_headers()
        .with_context(|| format!("Reading header row of {path:?}"))?
        .clone();
    let mut dataset = InputDataset::new(decode_record(&headers, encoding)?);
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
        let decoded = decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", idx + 2))?;
        dataset.push_row(decoded.iter().map(|field| Value::from_text(field)).collect());
    }
    Ok(dataset)
}

pub fn open_csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let writer: Box<dyn Write> = Box::new(BufWriter::new(
        File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
    ));
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .double_quote(true);
    Ok(builder.from_writer(writer))
}

/// Writes the canonical header row followed by the text form of every cell.
pub fn write_delimited_dataset(path: &Path, dataset: &OutputDataset, delimiter: u8) -> Result<()> {
    let mut writer = open_csv_writer(path, delimiter)?;
    writer
        .write_record(dataset.headers())
        .context("Writing output headers")?;
    for (idx, row) in dataset.text_rows(None).iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    writer.flush().context("Flushing output writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn workbook_extensions_are_detected() {
        assert_eq!(
            InputFormat::detect(&PathBuf::from("180-1 HG.XLSX")),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::detect(&PathBuf::from("legacy.xls")),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::detect(&PathBuf::from("manifest.csv")),
            InputFormat::Delimited
        );
        assert_eq!(InputFormat::detect(&PathBuf::from("manifest")), InputFormat::Delimited);
    }

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        let tsv = PathBuf::from("rows.tsv");
        assert_eq!(resolve_input_delimiter(&tsv, None), b'\t');
        assert_eq!(resolve_input_delimiter(&tsv, Some(b';')), b';');
        assert_eq!(resolve_input_delimiter(&PathBuf::from("rows.csv"), None), b',');
    }

    #[test]
    fn unknown_encodings_are_rejected() {
        assert!(resolve_encoding(Some("windows-1252")).is_ok());
        assert!(resolve_encoding(Some("not-a-charset")).is_err());
    }
}
