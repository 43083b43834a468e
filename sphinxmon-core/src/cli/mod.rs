mod autoconf;
mod error;


pub use autoconf::probe;
pub use error::PluginError;

use crate::conf::PluginConfig;
use crate::metrics::{LogSource, Metric, render_config, render_suggest, render_value, run};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use std::fmt;
use std::io::Write;
use tracing::info;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_UNSUPPORTED_METRIC: u8 = 2;

/// What munin-node asked the plugin to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Report the current value of the metric
    #[default]
    Fetch,
    /// Like fetch, with scan details on stderr
    Debug,
    /// Print graph metadata for the metric
    Config,
    /// List the metrics this plugin can be linked as
    Suggest,
    /// Check that the logs can be read
    Autoconf,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Fetch => "fetch",
            Mode::Debug => "debug",
            Mode::Config => "config",
            Mode::Suggest => "suggest",
            Mode::Autoconf => "autoconf",
        }
    }

    pub fn default_log_level(self) -> &'static str {
        match self {
            Mode::Debug => "debug",
            _ => "warn",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    ProbeFailed,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Success => EXIT_SUCCESS,
            Status::ProbeFailed => EXIT_FAILURE,
        }
    }
}

/// Single entry point for every plugin invocation.
///
/// Protocol text goes to `out`; `diag` only receives the debug-mode summary.
/// The metric is resolved before anything is written, so an unsupported name
/// produces no partial output.
pub fn execute<O, E>(
    mode: Mode,
    metric: Option<&str>,
    config: &PluginConfig,
    now: NaiveDateTime,
    out: &mut O,
    diag: &mut E,
) -> Result<Status, PluginError>
where
    O: Write,
    E: Write,
{
    match mode {
        Mode::Suggest => {
            out.write_all(render_suggest().as_bytes())?;
            Ok(Status::Success)
        }
        Mode::Autoconf => match probe(config) {
            Ok(()) => {
                writeln!(out, "yes")?;
                Ok(Status::Success)
            }
            Err(err) => {
                info!(error = %err, "autoconf probe failed");
                writeln!(out, "no ({err})")?;
                Ok(Status::ProbeFailed)
            }
        },
        Mode::Config => {
            let metric = resolve_metric(mode, metric)?;
            out.write_all(
                render_config(metric, &config.graph_category, config.interval).as_bytes(),
            )?;
            Ok(Status::Success)
        }
        Mode::Fetch | Mode::Debug => {
            let metric = resolve_metric(mode, metric)?;
            let report = run(metric, config, now);

            if mode == Mode::Debug {
                match metric.source() {
                    LogSource::Query => writeln!(
                        diag,
                        "{} query lines processed, {} queries in window",
                        report.query_lines_scanned, report.aggregate.query_count
                    )?,
                    LogSource::Daemon => writeln!(
                        diag,
                        "{} daemon log lines processed, {} rebuilds in window",
                        report.daemon_lines_scanned, report.aggregate.rebuild_count
                    )?,
                }
            }

            out.write_all(render_value(metric, &report.aggregate).as_bytes())?;
            Ok(Status::Success)
        }
    }
}

fn resolve_metric(mode: Mode, metric: Option<&str>) -> Result<Metric, PluginError> {
    let name = metric.ok_or(PluginError::MissingMetric { mode })?;
    Ok(name.parse()?)
}
