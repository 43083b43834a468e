use crate::conf::PluginConfig;
use crate::metrics::tests::test_helpers::{daemon_line, now, query_line, secs_before_now};
use crate::metrics::{Metric, render_value, run};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_log(path: &Path, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).unwrap();
}

fn config_in(dir: &TempDir) -> PluginConfig {
    PluginConfig {
        searchd_log_path: dir.path().join("searchd.log"),
        query_log_path: dir.path().join("query.log"),
        ..PluginConfig::default()
    }
}

#[test]
fn query_metrics_from_ten_lines() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_in(&dir);
    let mut lines = vec![query_line(secs_before_now(900), 50.0, 5000)];
    lines.extend((0..10).map(|i| query_line(secs_before_now(250 - i * 20), 0.5, 20)));
    write_log(&cfg.query_log_path, &lines);

    // Act
    let report = run(Metric::QueryRate, &cfg, now());

    // Assert
    assert_eq!(report.aggregate.query_count, 10);
    assert_eq!(report.query_lines_scanned, 11);
    assert_eq!(render_value(Metric::QueryRate, &report.aggregate), "query_rate.value 2.00\n");
    assert_eq!(render_value(Metric::QueryTime, &report.aggregate), "query_time.value 0.5000\n");
    assert_eq!(
        render_value(Metric::ResultsReturned, &report.aggregate),
        "results_returned.value 20.0000\n"
    );
}

#[test]
fn query_metric_does_not_touch_daemon_log() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_in(&dir);
    write_log(
        &cfg.searchd_log_path,
        &[
            daemon_line(secs_before_now(100), "rotating indices"),
            daemon_line(secs_before_now(50), "rotating finished"),
        ],
    );

    // Act
    let report = run(Metric::QueryRate, &cfg, now());

    // Assert
    assert_eq!(report.aggregate.rebuild_count, 0);
    assert_eq!(report.daemon_lines_scanned, 0);
}

#[test]
fn rebuild_metrics_from_daemon_log() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_in(&dir);
    write_log(
        &cfg.searchd_log_path,
        &[
            daemon_line(secs_before_now(200), "rotating indices: succesfully sent SIGHUP"),
            daemon_line(secs_before_now(170), "rotating finished"),
            daemon_line(secs_before_now(100), "rotating indices: succesfully sent SIGHUP"),
            daemon_line(secs_before_now(90), "rotating finished"),
        ],
    );

    // Act
    let report = run(Metric::TimePerRebuild, &cfg, now());

    // Assert
    assert_eq!(report.aggregate.rebuild_count, 2);
    assert_eq!(
        render_value(Metric::TimePerRebuild, &report.aggregate),
        "time_per_rebuild.value 20.00\n"
    );
    assert_eq!(
        render_value(Metric::IndexRebuilds, &report.aggregate),
        "index_rebuilds.value 2\n"
    );
}

#[test]
fn missing_log_degrades_to_zero() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_in(&dir);

    // Act
    let report = run(Metric::QueryRate, &cfg, now());

    // Assert
    assert_eq!(report.aggregate.query_count, 0);
    assert_eq!(render_value(Metric::QueryRate, &report.aggregate), "query_rate.value 0\n");
}

#[test]
fn unparsable_timestamp_discards_whole_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let cfg = config_in(&dir);
    write_log(
        &cfg.query_log_path,
        &[
            "[Sat Jun 31 21:17:58.609 2007] 0.004 sec [all/0/rel 1 (0,20)] [lj] test".to_string(),
            query_line(secs_before_now(20), 0.5, 2),
        ],
    );

    // Act
    let report = run(Metric::QueryTime, &cfg, now());

    // Assert
    assert_eq!(report.aggregate.query_count, 0);
    assert_eq!(render_value(Metric::QueryTime, &report.aggregate), "query_time.value 0\n");
}
