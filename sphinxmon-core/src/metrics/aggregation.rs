use crate::metrics::error::ScanError;
use crate::metrics::parse::{parse_query_line, parse_rebuild_line};
use crate::metrics::types::{QueryEvent, RebuildEvent, RebuildStep};
use chrono::{NaiveDateTime, TimeDelta};
use std::io;

/// The polling window `(now - interval, now]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveDateTime,
    interval_secs: u64,
}

impl Window {
    pub fn ending_at(now: NaiveDateTime, interval_secs: u64) -> Self {
        let start = i64::try_from(interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|d| now.checked_sub_signed(d))
            .unwrap_or(NaiveDateTime::MIN);

        Self {
            start,
            interval_secs,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// The start boundary itself is outside the window.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts > self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStats {
    pub count: u64,
    pub total_time: f64,
    pub total_results: u64,
    /// Lines pulled from the log, including noise and the boundary line.
    pub lines_scanned: u64,
}

impl QueryStats {
    pub fn record(&mut self, event: &QueryEvent) {
        self.count += 1;
        self.total_time += event.time_spent;
        self.total_results = self.total_results.saturating_add(event.results_returned);
    }
}

/// Rebuild pairing while walking the daemon log backwards.
///
/// A rotation is logged start-then-finish, so a reverse scan meets the finish
/// first and holds on to it until the matching start shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingState {
    #[default]
    Idle,
    AwaitingStart { finished_at: NaiveDateTime },
}

impl PairingState {
    /// Returns the next state and, when a start closes a pending finish, the
    /// length of that rebuild.
    pub fn transition(self, event: &RebuildEvent) -> (Self, Option<TimeDelta>) {
        match (self, event.step) {
            (PairingState::Idle, RebuildStep::Finish) => (
                PairingState::AwaitingStart {
                    finished_at: event.timestamp,
                },
                None,
            ),
            (PairingState::Idle, _) => (PairingState::Idle, None),
            (PairingState::AwaitingStart { finished_at }, RebuildStep::Start) => {
                (PairingState::Idle, Some(finished_at - event.timestamp))
            }
            // An earlier finish without a start in between is dropped.
            (state @ PairingState::AwaitingStart { .. }, _) => (state, None),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RebuildStats {
    pub count: u64,
    /// seconds
    pub total_duration: f64,
    pub lines_scanned: u64,
    state: PairingState,
}

impl RebuildStats {
    pub fn observe(&mut self, event: &RebuildEvent) {
        let (next, completed) = self.state.transition(event);
        self.state = next;

        if let Some(duration) = completed {
            self.count += 1;
            self.total_duration += duration.num_milliseconds() as f64 / 1000.0;
        }
    }

    pub fn state(&self) -> PairingState {
        self.state
    }
}

/// Fold newest-first query log lines until one falls out of `window`.
pub fn fold_queries<I>(lines: I, window: &Window) -> Result<QueryStats, ScanError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut stats = QueryStats::default();

    for line in lines {
        let line = line?;
        stats.lines_scanned += 1;

        let Some(event) = parse_query_line(&line)? else {
            continue;
        };
        if !window.contains(event.timestamp) {
            break;
        }
        stats.record(&event);
    }

    Ok(stats)
}

/// Fold newest-first daemon log lines until one falls out of `window`.
pub fn fold_rebuilds<I>(lines: I, window: &Window) -> Result<RebuildStats, ScanError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut stats = RebuildStats::default();

    for line in lines {
        let line = line?;
        stats.lines_scanned += 1;

        let Some(event) = parse_rebuild_line(&line)? else {
            continue;
        };
        if !window.contains(event.timestamp) {
            break;
        }
        stats.observe(&event);
    }

    Ok(stats)
}

/// Everything one run learned about its window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowAggregate {
    pub interval_secs: u64,

    pub query_count: u64,
    pub total_query_time: f64,
    pub total_results: u64,

    pub rebuild_count: u64,
    pub total_rebuild_duration: f64,
}

impl WindowAggregate {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_secs,
            ..Self::default()
        }
    }

    pub fn absorb_queries(&mut self, stats: &QueryStats) {
        self.query_count += stats.count;
        self.total_query_time += stats.total_time;
        self.total_results = self.total_results.saturating_add(stats.total_results);
    }

    pub fn absorb_rebuilds(&mut self, stats: &RebuildStats) {
        self.rebuild_count += stats.count;
        self.total_rebuild_duration += stats.total_duration;
    }

    /// Queries per minute, normalised by the configured interval rather than
    /// the span actually covered by the log.
    pub fn query_rate(&self) -> f64 {
        if self.query_count == 0 || self.interval_secs == 0 {
            return 0.0;
        }
        self.query_count as f64 / (self.interval_secs as f64 / 60.0)
    }

    pub fn avg_query_time(&self) -> f64 {
        if self.query_count == 0 {
            return 0.0;
        }
        self.total_query_time / self.query_count as f64
    }

    pub fn avg_results_returned(&self) -> f64 {
        if self.query_count == 0 {
            return 0.0;
        }
        self.total_results as f64 / self.query_count as f64
    }

    pub fn avg_rebuild_duration(&self) -> f64 {
        if self.rebuild_count == 0 {
            return 0.0;
        }
        self.total_rebuild_duration / self.rebuild_count as f64
    }
}
