use crate::conf::PluginConfig;
use crate::metrics::{LogSource, ScanError};
use std::fs::File;

/// Both logs must be readable for any of the graphs to mean something.
pub fn probe(config: &PluginConfig) -> Result<(), ScanError> {
    for source in [LogSource::Query, LogSource::Daemon] {
        let path = config.log_path(source);
        File::open(path).map_err(|e| ScanError::unavailable(path, e))?;
    }
    Ok(())
}
