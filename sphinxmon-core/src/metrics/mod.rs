//! Log Tailing Pipeline
//!
//! This module turns the tail of the two searchd log files into the numbers
//! munin graphs.
//!
//! Each run looks at one metric. The metric decides which log is read: the
//! query log feeds the query rate, the average query time and the average
//! number of results, while the daemon log feeds the rebuild count and the
//! average rebuild duration.
//!
//! Logs are read backwards, newest line first, and the scan stops as soon as
//! a line is older than the polling window. A log that keeps growing for
//! months therefore costs the same to poll as a fresh one.
//!
//! Rebuilds are reconstructed from pairs of lines. Because the scan runs
//! backwards the "rotating finished" line shows up before the matching
//! "rotating indices" line, so the pairing remembers the finish time until the
//! start is found.
//!
//!
//! The overall data processing architecture is:
//!
//! ReverseLines
//! parse_query_line / parse_rebuild_line
//! QueryEvent / RebuildEvent
//! QueryStats / RebuildStats
//! WindowAggregate
//! render_value
//!

mod aggregation;
mod constants;
mod error;
mod parse;
mod render;
mod run;
mod scanner;
mod types;

#[cfg(test)]
mod tests;

pub use aggregation::*;
pub use constants::*;
pub use error::*;
pub use parse::{parse_query_line, parse_rebuild_line, parse_timestamp};
pub use render::*;
pub use run::*;
pub use scanner::ReverseLines;
pub use types::*;
