use crate::metrics::constants::{
    LOG_TIMESTAMP_FORMAT, ROTATION_FINISH_MARKER, ROTATION_START_MARKER,
};
use crate::metrics::error::ParseError;
use crate::metrics::types::{QueryEvent, RebuildEvent, RebuildStep};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

// `[Fri Jun 29 21:17:58.609 2007]`; only the weekday/month shape is checked here,
// the rest is left to chrono so a bad date surfaces as an error rather than noise.
const TIMESTAMP_PREFIX: &str = r"^\[(?P<ts>[A-Z][a-z]{2}\s+[A-Z][a-z]{2}\s+[^\]]*)\]";

static TIMESTAMP_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIMESTAMP_PREFIX).expect("timestamp pattern is valid"));

// [ts] 0.004 sec [0.004 sec ...] [all/0/rel 35254 (0,20)] [index] query
static QUERY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{TIMESTAMP_PREFIX}\s+(?P<time>\d+(?:\.\d+)?)\s+sec\b.*?\[\w+/\d+/[^\s\]]+\s+(?P<matches>\d+)\s+\("
    ))
    .expect("query line pattern is valid")
});

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ParseError> {
    // searchd pads single digit days with a space.
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    NaiveDateTime::parse_from_str(&normalized, LOG_TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::UnparsableTimestamp {
            text: text.to_string(),
            source,
        }
    })
}

/// Parse one query log line.
///
/// Lines that do not look like a query entry yield `Ok(None)`. A line with the
/// right shape but an impossible date is an error.
pub fn parse_query_line(line: &str) -> Result<Option<QueryEvent>, ParseError> {
    let Some(caps) = QUERY_LINE.captures(line) else {
        return Ok(None);
    };

    let timestamp = parse_timestamp(&caps["ts"])?;

    let Ok(time_spent) = caps["time"].parse::<f64>() else {
        return Ok(None);
    };
    // Overflowing counts are treated as garbage, not as a huge sample.
    let Ok(results_returned) = caps["matches"].parse::<u64>() else {
        return Ok(None);
    };

    Ok(Some(QueryEvent {
        timestamp,
        time_spent,
        results_returned,
    }))
}

/// Parse one daemon log line.
///
/// Every line that starts with a timestamp yields an event, even when it has
/// nothing to do with index rotation.
pub fn parse_rebuild_line(line: &str) -> Result<Option<RebuildEvent>, ParseError> {
    let Some(caps) = TIMESTAMP_LINE.captures(line) else {
        return Ok(None);
    };

    let timestamp = parse_timestamp(&caps["ts"])?;

    Ok(Some(RebuildEvent {
        timestamp,
        step: classify(line),
    }))
}

fn classify(line: &str) -> RebuildStep {
    if line.contains(ROTATION_FINISH_MARKER) {
        RebuildStep::Finish
    } else if line.contains(ROTATION_START_MARKER) {
        RebuildStep::Start
    } else {
        RebuildStep::Other
    }
}
