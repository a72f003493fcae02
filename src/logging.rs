use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Append to a file. Works alongside the terminal UI.
    File(&'a Path),
    /// Plain records on stderr, for batch runs.
    Stderr,
    /// Drop everything; the terminal UI owns the screen.
    Discard,
}

fn make_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| anyhow!("invalid log level '{default_level}': {e}")),
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(target: LogTarget<'_>, default_level: &str) -> Result<()> {
    let filter = make_filter(default_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::File(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder
            .without_time()
            .with_target(false)
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::Discard => builder.with_writer(io::sink).try_init(),
    };
    installed.map_err(|e| anyhow!("cannot install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(make_filter("mortgage_calculator=loud").is_err());
    }

    #[test]
    fn accepts_plain_levels() {
        for level in ["error", "warn", "info", "debug", "trace", "mortgage_calculator=debug"] {
            assert!(make_filter(level).is_ok(), "{level}");
        }
    }
}
