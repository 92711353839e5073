//! Column listing for the export registry.
//!
//! Renders every output column with its position, the input column it is
//! matched against, and its constant value, as an ASCII table, JSON or YAML.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{ColumnsArgs, ListingFormat},
    registry, table,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    registry::validate(registry::columns()).context("Checking export columns")?;
    print!("{}", render(args.format)?);
    info!("Listed {} export column(s)", registry::columns().len());
    Ok(())
}

pub fn render(format: ListingFormat) -> Result<String> {
    let columns = registry::columns();
    match format {
        ListingFormat::Json => {
            let mut rendered =
                serde_json::to_string_pretty(&columns).context("Serializing columns as JSON")?;
            rendered.push('\n');
            Ok(rendered)
        }
        ListingFormat::Yaml => {
            serde_yaml::to_string(&columns).context("Serializing columns as YAML")
        }
        ListingFormat::Table => {
            let headers = vec![
                "#".to_string(),
                "output".to_string(),
                "source".to_string(),
                "default".to_string(),
            ];
            let rows = columns
                .iter()
                .map(|column| {
                    vec![
                        column.position.to_string(),
                        column.output_name.to_string(),
                        column.source_name.to_string(),
                        column.default_value.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            Ok(table::render_table(&headers, &rows))
        }
    }
}
