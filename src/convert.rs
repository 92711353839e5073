use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, ensure};
use log::{debug, info};

use crate::{
    cli::{ConvertArgs, OutputFormat},
    data::{InputDataset, OutputDataset},
    io_utils::{self, InputFormat},
    naming, projector, table, workbook,
};

pub const CSV_MIME_TYPE: &str = "text/csv";

/// What a conversion produced and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub rows: usize,
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    run(args).map(|_| ())
}

pub fn run(args: &ConvertArgs) -> Result<Conversion> {
    let input_name = file_name(&args.input)?;
    let output = resolve_output_path(args, input_name);
    ensure!(
        output != args.input,
        "Output path {:?} would overwrite the input file",
        output
    );
    info!(
        "Converting '{}' -> {:?} ({:?})",
        args.input.display(),
        output,
        args.format
    );

    let input = load_input(args)?;
    let report = projector::match_report(input.headers());
    info!(
        "Matched {} of {} sourced column(s) against {} input header(s)",
        report.matched.len(),
        report.matched.len() + report.unmatched.len(),
        input.headers().len()
    );
    if !report.unmatched.is_empty() {
        debug!("Left blank (no matching input column): {:?}", report.unmatched);
    }

    let dataset = projector::project(&input);
    write_output(args, &output, &dataset)?;

    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = match args.format {
        OutputFormat::Xlsx => naming::XLSX_MIME_TYPE,
        OutputFormat::Csv => CSV_MIME_TYPE,
    };
    info!(
        "Wrote {} row(s) x {} column(s) to {:?} ({mime_type})",
        dataset.len(),
        dataset.headers().len(),
        output
    );

    if let Some(limit) = args.preview {
        table::print_preview(&dataset, limit);
    }

    Ok(Conversion {
        output,
        file_name,
        mime_type,
        rows: dataset.len(),
    })
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Input path {path:?} has no UTF-8 file name"))
}

/// `--output` wins; otherwise the derived name lands in `--output-dir` or
/// next to the input. Delimited inputs lose their own extension first.
pub fn resolve_output_path(args: &ConvertArgs, input_name: &str) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }
    let base = match InputFormat::detect(&args.input) {
        InputFormat::Workbook => input_name,
        InputFormat::Delimited => Path::new(input_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(input_name),
    };
    let mut derived = PathBuf::from(naming::derive_output_name(base));
    if args.format == OutputFormat::Csv {
        derived.set_extension("csv");
    }
    let directory = args
        .output_dir
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    directory.join(derived)
}

fn load_input(args: &ConvertArgs) -> Result<InputDataset> {
    let dataset = match InputFormat::detect(&args.input) {
        InputFormat::Workbook => workbook::read_workbook_dataset(&args.input)
            .with_context(|| format!("Reading workbook {:?}", args.input))?,
        InputFormat::Delimited => {
            let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
            let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
            debug!(
                "Reading delimited input with '{}' ({})",
                crate::printable_delimiter(delimiter),
                encoding.name()
            );
            io_utils::read_delimited_dataset(&args.input, delimiter, encoding)
                .with_context(|| format!("Reading delimited input {:?}", args.input))?
        }
    };
    debug!(
        "Loaded {} row(s) with headers {:?}",
        dataset.len(),
        dataset.headers()
    );
    Ok(dataset)
}

fn write_output(args: &ConvertArgs, output: &Path, dataset: &OutputDataset) -> Result<()> {
    match args.format {
        OutputFormat::Xlsx => workbook::write_workbook(output, dataset)
            .with_context(|| format!("Writing workbook {output:?}")),
        OutputFormat::Csv => io_utils::write_delimited_dataset(
            output,
            dataset,
            args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER),
        )
        .with_context(|| format!("Writing CSV {output:?}")),
    }
}
