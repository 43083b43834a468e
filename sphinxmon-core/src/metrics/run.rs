use crate::conf::PluginConfig;
use crate::metrics::aggregation::{
    QueryStats, RebuildStats, Window, WindowAggregate, fold_queries, fold_rebuilds,
};
use crate::metrics::error::ScanError;
use crate::metrics::scanner::ReverseLines;
use crate::metrics::types::{LogSource, Metric};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub metric: Metric,
    pub window: Window,
    pub aggregate: WindowAggregate,
    pub query_lines_scanned: u64,
    pub daemon_lines_scanned: u64,
}

/// Aggregate the window ending at `now` for `metric`.
///
/// Only the log the metric needs is read. A log that cannot be scanned is
/// reported and contributes nothing, so the metric falls back to zero.
pub fn run(metric: Metric, config: &PluginConfig, now: NaiveDateTime) -> RunReport {
    let window = Window::ending_at(now, config.interval);
    let mut aggregate = WindowAggregate::new(config.interval);
    let mut query_lines_scanned = 0;
    let mut daemon_lines_scanned = 0;

    let path = config.log_path(metric.source());

    match metric.source() {
        LogSource::Query => match scan_query_log(path, &window) {
            Ok(stats) => {
                query_lines_scanned = stats.lines_scanned;
                aggregate.absorb_queries(&stats);
            }
            Err(err) => report_scan_failure(LogSource::Query, path, &err),
        },
        LogSource::Daemon => match scan_daemon_log(path, &window) {
            Ok(stats) => {
                daemon_lines_scanned = stats.lines_scanned;
                aggregate.absorb_rebuilds(&stats);
            }
            Err(err) => report_scan_failure(LogSource::Daemon, path, &err),
        },
    }

    debug!(
        metric = %metric,
        window_start = %window.start(),
        queries = aggregate.query_count,
        rebuilds = aggregate.rebuild_count,
        query_lines_scanned,
        daemon_lines_scanned,
        "window aggregated"
    );

    RunReport {
        metric,
        window,
        aggregate,
        query_lines_scanned,
        daemon_lines_scanned,
    }
}

pub fn scan_query_log(path: &Path, window: &Window) -> Result<QueryStats, ScanError> {
    let lines = ReverseLines::open(path)?;
    fold_queries(lines, window)
}

pub fn scan_daemon_log(path: &Path, window: &Window) -> Result<RebuildStats, ScanError> {
    let lines = ReverseLines::open(path)?;
    fold_rebuilds(lines, window)
}

fn report_scan_failure(source: LogSource, path: &Path, err: &ScanError) {
    warn!(
        source = %source,
        path = %path.display(),
        error = %err,
        "log scan failed, reporting zero"
    );
}
