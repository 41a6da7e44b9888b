//! # xtg
//!
//! CLI tool for generating Rust types from sample XML documents.
//!
//! ## Usage
//!
//! ```bash
//! # Generate records from two samples
//! xtg generate feed1.xml feed2.xml -o src/feed.rs
//!
//! # Read a sample from stdin and wrap the records in a module
//! curl -s https://example.com/feed.xml | xtg generate --module feed
//!
//! # Dump the inferred schema tree
//! xtg schema feed1.xml --format yaml
//! ```

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use commands::generate::{GenerateArgs, handle_generate};
use commands::schema::{SchemaArgs, SchemaFormat, handle_schema};
use logging::LogConfig;

#[derive(Parser)]
#[command(name = "xtg")]
#[command(author, version, about = "Generate Rust types from sample XML documents", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust record definitions from sample documents
    Generate {
        /// Sample XML documents (`-` or none reads stdin)
        inputs: Vec<PathBuf>,

        /// Output file for the generated code
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the records in `pub mod <NAME>`
        #[arg(long, value_name = "NAME")]
        module: Option<String>,

        /// Omit the generated-code comment (and the serde `use` line unless --module is set)
        #[arg(long)]
        no_preamble: bool,

        /// Keep fields in first-seen order instead of sorting them
        #[arg(long)]
        preserve_order: bool,

        /// Only ingest the first N documents
        #[arg(long, value_name = "N")]
        sample_size: Option<usize>,

        /// Configuration file path (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Infer each input on its own and merge the schemas
        #[arg(long)]
        separate: bool,
    },

    /// Print the inferred schema tree
    Schema {
        /// Sample XML documents (`-` or none reads stdin)
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SchemaFormat::Json)]
        format: SchemaFormat,

        /// Output file for the schema
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(&LogConfig {
        verbosity: cli.verbose,
        json: cli.log_json,
    })?;

    match cli.command {
        Commands::Generate {
            inputs,
            output,
            module,
            no_preamble,
            preserve_order,
            sample_size,
            config,
            separate,
        } => handle_generate(&GenerateArgs {
            inputs,
            output,
            module,
            no_preamble,
            preserve_order,
            sample_size,
            config,
            separate,
        })?,

        Commands::Schema {
            inputs,
            format,
            output,
            config,
        } => handle_schema(&SchemaArgs {
            inputs,
            format,
            output,
            config,
        })?,
    }
    Ok(())
}
