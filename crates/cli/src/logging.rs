//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout only ever carries generated output.

use anyhow::Context;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Clone, Debug, Default)]
pub struct LogConfig {
    /// Number of `-v` flags given
    pub verbosity: u8,
    /// Emit logs as JSON lines when true; otherwise plain text.
    pub json: bool,
}

impl LogConfig {
    /// Level used when `RUST_LOG` is not set
    pub fn level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(cfg: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cfg.level()))
        .context("invalid log filter")?;

    let fmt_layer = if cfg.json {
        fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to set global tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        let level = |verbosity| LogConfig { verbosity, json: false }.level();
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(7), "trace");
    }
}
