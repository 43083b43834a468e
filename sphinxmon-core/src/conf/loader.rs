use crate::conf::error::ConfigError;
use crate::metrics::{DEFAULT_INTERVAL_SECS, LogSource};
use ::config::{Config, Environment, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEARCHD_LOG_PATH: &str = "/var/log/sphinxsearch/searchd.log";
pub const DEFAULT_QUERY_LOG_PATH: &str = "/var/log/sphinxsearch/query.log";
pub const DEFAULT_GRAPH_CATEGORY: &str = "Sphinx";

/// Plugin settings, read once from the environment munin-node provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub searchd_log_path: PathBuf,
    pub query_log_path: PathBuf,
    /// Window length in seconds; should match the munin polling period.
    pub interval: u64,
    pub graph_category: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            searchd_log_path: PathBuf::from(DEFAULT_SEARCHD_LOG_PATH),
            query_log_path: PathBuf::from(DEFAULT_QUERY_LOG_PATH),
            interval: DEFAULT_INTERVAL_SECS,
            graph_category: DEFAULT_GRAPH_CATEGORY.to_string(),
        }
    }
}

impl PluginConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    /// Same as [`PluginConfig::from_env`], but reads `vars` instead of the
    /// process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let cfg: PluginConfig = Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::InvalidInterval {
                interval: self.interval,
            });
        }
        Ok(())
    }

    pub fn log_path(&self, source: LogSource) -> &Path {
        match source {
            LogSource::Query => &self.query_log_path,
            LogSource::Daemon => &self.searchd_log_path,
        }
    }
}
