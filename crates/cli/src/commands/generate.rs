//! `xtg generate`: Rust records from sample documents

use std::path::PathBuf;

use crate::commands::{Input, ingest_all, ingest_separately, load_config, write_output};
use crate::error::CliError;

/// Arguments for the `generate` command
#[derive(Debug, Default)]
pub struct GenerateArgs {
    /// Sample documents (`-` for stdin)
    pub inputs: Vec<PathBuf>,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Wrap the records in `pub mod <name>`
    pub module: Option<String>,
    /// Skip the generated-code comment, and the `use` line outside a module
    pub no_preamble: bool,
    /// Keep first-seen field order instead of sorting
    pub preserve_order: bool,
    /// Stop after this many documents
    pub sample_size: Option<usize>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Ingest each input on its own and merge the schemas
    pub separate: bool,
}

/// Handle the `generate` command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(module) = &args.module {
        config.module_name = Some(module.clone());
    }
    if args.no_preamble {
        config.emit_preamble = false;
    }
    if args.preserve_order {
        config.canonical = false;
    }
    if let Some(size) = args.sample_size {
        config.sample_size = size;
    }

    let inputs = Input::from_args(&args.inputs);
    let converter = if args.separate {
        ingest_separately(&config, &inputs)?
    } else {
        ingest_all(&config, &inputs)?
    };

    let stats = converter.stats();
    tracing::info!(
        documents = stats.documents_processed,
        skipped = stats.documents_skipped,
        schema_nodes = stats.schema_nodes,
        max_depth = stats.max_depth,
        "Inference complete"
    );

    let code = converter.generate_string()?;
    write_output(args.output.as_deref(), &code)
}
