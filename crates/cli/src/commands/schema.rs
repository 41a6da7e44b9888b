//! `xtg schema`: dump the inferred schema tree

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;
use xml_typegen_core::InferenceStats;
use xml_typegen_core::inference::NodeDescriptor;

use crate::commands::{Input, ingest_all, load_config, write_output};
use crate::error::CliError;

/// Output format for the `schema` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `schema` command
#[derive(Debug, Default)]
pub struct SchemaArgs {
    /// Sample documents (`-` for stdin)
    pub inputs: Vec<PathBuf>,
    /// Output format
    pub format: SchemaFormat,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaDump {
    stats: InferenceStats,
    nodes: Vec<NodeDescriptor>,
}

/// Handle the `schema` command
pub fn handle_schema(args: &SchemaArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let converter = ingest_all(&config, &Input::from_args(&args.inputs))?;

    let tree = if config.canonical {
        converter.tree().canonicalized()
    } else {
        converter.tree().clone()
    };
    let dump = SchemaDump {
        stats: converter.stats(),
        nodes: tree.describe(),
    };

    let output = match args.format {
        SchemaFormat::Json => serde_json::to_string_pretty(&dump)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::Serialize(e.to_string()))?,
        SchemaFormat::Yaml => {
            serde_yaml::to_string(&dump).map_err(|e| CliError::Serialize(e.to_string()))?
        }
    };
    write_output(args.output.as_deref(), &output)
}
