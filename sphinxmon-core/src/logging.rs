use std::env;
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Overrides the output format picked from the terminal check.
pub const LOG_FORMAT_VAR: &str = "SPHINXMON_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Initialize the logging system on stderr.
///
/// stdout belongs to the munin protocol, so every diagnostic goes to stderr:
/// - Uses `RUST_LOG` for filtering, falling back to `default_level`
/// - Human readable output on a terminal, flattened JSON lines otherwise
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_format() {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init(),
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init(),
    }
}

pub fn log_format() -> LogFormat {
    match env::var(LOG_FORMAT_VAR).as_deref() {
        Ok("json") => LogFormat::Json,
        Ok("pretty") => LogFormat::Pretty,
        _ => default_log_format(),
    }
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}
