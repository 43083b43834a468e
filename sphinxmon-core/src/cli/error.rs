use crate::cli::{EXIT_FAILURE, EXIT_UNSUPPORTED_METRIC, Mode};
use crate::metrics::UnsupportedMetric;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    UnsupportedMetric(#[from] UnsupportedMetric),

    #[error("no metric given for {mode} mode")]
    MissingMetric { mode: Mode },

    #[error("failed to write plugin output: {0}")]
    Output(#[from] io::Error),
}

impl PluginError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PluginError::UnsupportedMetric(_) | PluginError::MissingMetric { .. } => {
                EXIT_UNSUPPORTED_METRIC
            }
            PluginError::Output(_) => EXIT_FAILURE,
        }
    }
}
