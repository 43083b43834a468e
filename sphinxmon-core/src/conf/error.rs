use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read plugin environment: {source}")]
    Load {
        #[source]
        source: ::config::ConfigError,
    },

    #[error("interval must be a positive number of seconds, got {interval}")]
    InvalidInterval { interval: u64 },
}

impl From<::config::ConfigError> for ConfigError {
    fn from(source: ::config::ConfigError) -> Self {
        Self::Load { source }
    }
}
