use crate::metrics::error::UnsupportedMetric;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// One matched query log line.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEvent {
    pub timestamp: NaiveDateTime,
    /// seconds
    pub time_spent: f64,
    pub results_returned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildStep {
    Start,
    Finish,
    Other,
}

/// One timestamped daemon log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildEvent {
    pub timestamp: NaiveDateTime,
    pub step: RebuildStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Query,
    Daemon,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Query => f.write_str("query log"),
            LogSource::Daemon => f.write_str("daemon log"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    QueryRate,
    QueryTime,
    ResultsReturned,
    IndexRebuilds,
    TimePerRebuild,
}

/// Static graph metadata reported in `config` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub title: &'static str,
    pub vlabel: &'static str,
    pub label: &'static str,
    pub info: &'static str,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::QueryRate,
        Metric::QueryTime,
        Metric::ResultsReturned,
        Metric::IndexRebuilds,
        Metric::TimePerRebuild,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::QueryRate => "query_rate",
            Metric::QueryTime => "query_time",
            Metric::ResultsReturned => "results_returned",
            Metric::IndexRebuilds => "index_rebuilds",
            Metric::TimePerRebuild => "time_per_rebuild",
        }
    }

    pub fn source(self) -> LogSource {
        match self {
            Metric::QueryRate | Metric::QueryTime | Metric::ResultsReturned => LogSource::Query,
            Metric::IndexRebuilds | Metric::TimePerRebuild => LogSource::Daemon,
        }
    }

    pub fn info(self) -> MetricInfo {
        match self {
            Metric::QueryRate => MetricInfo {
                title: "Sphinx query rate",
                vlabel: "queries per minute",
                label: "queries",
                info: "Search queries answered per minute",
            },
            Metric::QueryTime => MetricInfo {
                title: "Sphinx average query time",
                vlabel: "seconds",
                label: "avg query time",
                info: "Average time spent executing a search query",
            },
            Metric::ResultsReturned => MetricInfo {
                title: "Sphinx average results returned",
                vlabel: "results",
                label: "avg results",
                info: "Average number of matches reported per search query",
            },
            Metric::IndexRebuilds => MetricInfo {
                title: "Sphinx index rebuilds",
                vlabel: "rebuilds",
                label: "rebuilds",
                info: "Completed index rotations",
            },
            Metric::TimePerRebuild => MetricInfo {
                title: "Sphinx average index rebuild time",
                vlabel: "seconds",
                label: "avg rebuild time",
                info: "Average time between the start and the end of an index rotation",
            },
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = UnsupportedMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnsupportedMetric(s.to_string()))
    }
}
