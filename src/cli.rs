use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Rows shown by a bare `--preview`.
pub const DEFAULT_PREVIEW_ROWS: &str = "10";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert shipment manifests into the HG AMS ACAS export",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a manifest spreadsheet into the fixed 80-column export
    Convert(ConvertArgs),
    /// List the export columns and where their values come from
    Columns(ColumnsArgs),
    /// Print the export file name derived from an input file name
    Name(NameArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input manifest (.xlsx, .xls, .csv or .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Explicit output file (defaults to the derived export name)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Directory for the derived export name (defaults to the input's directory)
    #[arg(long = "output-dir", conflicts_with = "output")]
    pub output_dir: Option<PathBuf>,
    /// Output file format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Xlsx)]
    pub format: OutputFormat,
    /// Delimiter for delimited-text input and CSV output (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited-text input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Print the first rows of the export as a table (10 when no count is given)
    #[arg(long = "preview", num_args = 0..=1, default_missing_value = DEFAULT_PREVIEW_ROWS)]
    pub preview: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Listing format
    #[arg(long = "format", value_enum, default_value_t = ListingFormat::Table)]
    pub format: ListingFormat,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Original input file name, e.g. "180-50508754 HG.xlsx"
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListingFormat {
    Table,
    Json,
    Yaml,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_names_resolve() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("pipe"), Ok(b'|'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
    }

    #[test]
    fn preview_flag_defaults_to_ten_rows() {
        let cli = Cli::parse_from(["hg-ams-acas", "convert", "-i", "in.xlsx", "--preview"]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.preview, Some(10));
        assert_eq!(args.format, OutputFormat::Xlsx);
    }

    #[test]
    fn output_and_output_dir_conflict() {
        let parsed = Cli::try_parse_from([
            "hg-ams-acas",
            "convert",
            "-i",
            "in.xlsx",
            "-o",
            "out.xlsx",
            "--output-dir",
            "exports",
        ]);
        assert!(parsed.is_err());
    }
}
