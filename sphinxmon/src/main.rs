use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sphinxmon_core::cli::{EXIT_FAILURE, Mode, execute};
use sphinxmon_core::conf::PluginConfig;
use sphinxmon_core::logging::init_logging;
use sphinxmon_core::metrics::PLUGIN_NAME_PREFIX;
use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "sphinxmon",
    version,
    about = "Sphinx searchd log metrics for munin"
)]
struct Cli {
    /// Plugin mode, as passed by munin-node
    #[arg(value_enum, default_value_t = Mode::Fetch)]
    mode: Mode,

    /// Metric to report. Defaults to the suffix of a `sphinx_<metric>` symlink.
    #[arg(long, short)]
    metric: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.mode.default_log_level());

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("sphinxmon error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = PluginConfig::from_env().context("failed to load plugin configuration")?;
    let metric = cli.metric.or_else(invoked_metric);
    let now = Local::now().naive_local();

    let mut out = io::stdout().lock();
    let mut diag = io::stderr().lock();

    match execute(cli.mode, metric.as_deref(), &config, now, &mut out, &mut diag) {
        Ok(status) => Ok(status.exit_code()),
        Err(err) => {
            error!(mode = %cli.mode, error = %err, "plugin invocation rejected");
            Ok(err.exit_code())
        }
    }
}

/// `sphinx_query_rate` -> `query_rate`
fn invoked_metric() -> Option<String> {
    let arg0 = env::args_os().next()?;
    let name = Path::new(&arg0).file_name()?.to_str()?;
    name.strip_prefix(PLUGIN_NAME_PREFIX).map(str::to_string)
}
