use chrono::{NaiveDateTime, TimeDelta};

/// Fixed clock for every test run. A Friday, so weekday names line up.
pub fn test_now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-15 12:00:00", "%Y-%m-%d %H:%M:%S")
        .expect("invalid test clock")
}

fn stamp(secs_ago: i64) -> String {
    (test_now() - TimeDelta::seconds(secs_ago))
        .format("%a %b %e %H:%M:%S%.3f %Y")
        .to_string()
}

/// A searchd query log entry `secs_ago` seconds before [`test_now`].
pub fn query_line(secs_ago: i64, time_spent: f64, matches: u64) -> String {
    format!(
        "[{}] {time_spent:.3} sec [ext2/0/rel {matches} (0,20)] [products] running shoes",
        stamp(secs_ago)
    )
}

/// A searchd daemon log entry `secs_ago` seconds before [`test_now`].
pub fn daemon_line(secs_ago: i64, message: &str) -> String {
    format!("[{}] [ 4242] {message}", stamp(secs_ago))
}
