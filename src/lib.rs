pub mod cli;
pub mod columns;
pub mod convert;
pub mod data;
pub mod io_utils;
pub mod naming;
pub mod projector;
pub mod registry;
pub mod table;
pub mod transform;
pub mod workbook;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("hg_ams_acas", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("{:?}", cli.command);
    match cli.command {
        Commands::Convert(args) => convert::execute(&args),
        Commands::Columns(args) => columns::execute(&args),
        Commands::Name(args) => handle_name(&args),
    }
}

fn handle_name(args: &cli::NameArgs) -> Result<()> {
    let derived = naming::derive_output_name(&args.filename);
    debug!(
        "Prefix '{}' extracted from '{}'",
        naming::extract_prefix(&args.filename),
        args.filename
    );
    println!("{derived}");
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
