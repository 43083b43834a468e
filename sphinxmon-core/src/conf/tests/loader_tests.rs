use crate::conf::{ConfigError, DEFAULT_GRAPH_CATEGORY, PluginConfig};
use crate::metrics::LogSource;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn empty_environment_uses_defaults() {
    // Act
    let cfg = PluginConfig::from_vars(Vec::<(String, String)>::new()).unwrap();

    // Assert
    assert_eq!(cfg, PluginConfig::default());
    assert_eq!(cfg.interval, 300);
    assert_eq!(cfg.graph_category, DEFAULT_GRAPH_CATEGORY);
}

#[test]
fn environment_overrides_every_field() {
    // Arrange
    let vars = [
        ("searchd_log_path", "/srv/sphinx/searchd.log"),
        ("query_log_path", "/srv/sphinx/query.log"),
        ("interval", "60"),
        ("graph_category", "search"),
    ];

    // Act
    let cfg = PluginConfig::from_vars(vars).unwrap();

    // Assert
    assert_eq!(
        cfg,
        PluginConfig {
            searchd_log_path: PathBuf::from("/srv/sphinx/searchd.log"),
            query_log_path: PathBuf::from("/srv/sphinx/query.log"),
            interval: 60,
            graph_category: "search".to_string(),
        }
    );
}

#[test]
fn unrelated_variables_are_ignored() {
    // Arrange
    let vars = [("path", "/usr/bin:/bin"), ("interval", "120")];

    // Act
    let cfg = PluginConfig::from_vars(vars).unwrap();

    // Assert
    assert_eq!(cfg.interval, 120);
    assert_eq!(cfg.query_log_path, PluginConfig::default().query_log_path);
}

#[test]
fn zero_interval_is_rejected() {
    // Act
    let err = PluginConfig::from_vars([("interval", "0")]).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::InvalidInterval { interval: 0 }));
}

#[test]
fn non_numeric_interval_is_rejected() {
    // Act
    let err = PluginConfig::from_vars([("interval", "five minutes")]).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Load { .. }));
}

#[test]
fn log_path_follows_source() {
    // Arrange
    let cfg = PluginConfig::default();

    // Act / Assert
    assert_eq!(
        cfg.log_path(LogSource::Query),
        Path::new("/var/log/sphinxsearch/query.log")
    );
    assert_eq!(
        cfg.log_path(LogSource::Daemon),
        Path::new("/var/log/sphinxsearch/searchd.log")
    );
}
