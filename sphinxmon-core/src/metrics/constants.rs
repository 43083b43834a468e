/// Polling window used when `interval` is not configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Bytes read per step while walking a log backwards.
pub const REVERSE_BLOCK_SIZE: usize = 8 * 1024;

pub const ROTATION_START_MARKER: &str = "rotating indices";
pub const ROTATION_FINISH_MARKER: &str = "rotating finished";

/// `Fri Jun 29 21:17:58.609 2007`, after whitespace has been collapsed.
pub const LOG_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S%.f %Y";

/// Munin plugins are installed as `sphinx_<metric>` symlinks.
pub const PLUGIN_NAME_PREFIX: &str = "sphinx_";
