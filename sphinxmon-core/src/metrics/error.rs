use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unparsable timestamp '{text}': {source}")]
    UnparsableTimestamp {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure of one log scan. The run reports it and leaves the metric at zero.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("log file {path} is unavailable: {source}")]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log: {0}")]
    Read(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ScanError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogUnavailable {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported metric '{0}'")]
pub struct UnsupportedMetric(pub String);
