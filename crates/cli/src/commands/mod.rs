//! CLI command implementations

pub mod generate;
pub mod schema;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use xml_typegen_core::{InferenceConfig, XMLConverter};

use crate::error::{CliError, ConfigError};

/// One sample document source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Map command-line paths to inputs; no paths or `-` read stdin.
    pub fn from_args(paths: &[PathBuf]) -> Vec<Input> {
        if paths.is_empty() {
            return vec![Input::Stdin];
        }
        paths
            .iter()
            .map(|p| {
                if p.as_os_str() == "-" {
                    Input::Stdin
                } else {
                    Input::File(p.clone())
                }
            })
            .collect()
    }

    /// Fold this input into `converter`
    pub fn ingest_into(&self, converter: &mut XMLConverter) -> Result<(), CliError> {
        let result = match self {
            Input::Stdin => converter.ingest_reader(std::io::stdin().lock()),
            Input::File(path) => converter.ingest_file(path),
        };
        match result {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                tracing::info!(input = %self, "Sample size reached, input ignored");
                Ok(())
            }
            Err(e) => Err(CliError::inference(self.to_string(), e)),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load an [`InferenceConfig`] from a TOML file, or the defaults when no
/// file is given.
pub fn load_config(path: Option<&Path>) -> Result<InferenceConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(InferenceConfig::default());
    };
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::InvalidToml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Ingest all inputs into one converter
pub fn ingest_all(config: &InferenceConfig, inputs: &[Input]) -> Result<XMLConverter, CliError> {
    let mut converter = XMLConverter::with_config(config.clone());
    for input in inputs {
        input.ingest_into(&mut converter)?;
    }
    Ok(converter)
}

/// Ingest every input into its own converter and combine the results
pub fn ingest_separately(
    config: &InferenceConfig,
    inputs: &[Input],
) -> Result<XMLConverter, CliError> {
    let mut combined = XMLConverter::with_config(config.clone());
    for input in inputs {
        let single = ingest_all(config, std::slice::from_ref(input))?;
        combined = XMLConverter::combine(&combined, &single);
    }
    Ok(combined)
}

/// Write `content` to `output`, or to stdout when no path is given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
