use crate::metrics::aggregation::WindowAggregate;
use crate::metrics::types::Metric;
use std::fmt::Write;

/// Value of `metric`, or `0` when nothing contributed to it.
pub fn metric_value(metric: Metric, agg: &WindowAggregate) -> String {
    match metric {
        Metric::QueryRate if agg.query_count > 0 => format!("{:.2}", agg.query_rate()),
        Metric::QueryTime if agg.query_count > 0 => format!("{:.4}", agg.avg_query_time()),
        Metric::ResultsReturned if agg.query_count > 0 => {
            format!("{:.4}", agg.avg_results_returned())
        }
        Metric::IndexRebuilds => agg.rebuild_count.to_string(),
        Metric::TimePerRebuild if agg.rebuild_count > 0 => {
            format!("{:.2}", agg.avg_rebuild_duration())
        }
        _ => "0".to_string(),
    }
}

pub fn render_value(metric: Metric, agg: &WindowAggregate) -> String {
    format!("{}.value {}\n", metric.name(), metric_value(metric, agg))
}

pub fn render_config(metric: Metric, category: &str, interval_secs: u64) -> String {
    let info = metric.info();
    let name = metric.name();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "graph_title {}", info.title);
    let _ = writeln!(out, "graph_vlabel {}", info.vlabel);
    let _ = writeln!(out, "graph_category {category}");
    let _ = writeln!(out, "graph_args --base 1000 -l 0");
    let _ = writeln!(
        out,
        "graph_info {}, measured over the last {interval_secs} seconds.",
        info.info
    );
    let _ = writeln!(out, "{name}.label {}", info.label);
    let _ = writeln!(out, "{name}.type GAUGE");
    let _ = writeln!(out, "{name}.min 0");
    let _ = writeln!(out, "{name}.info {}", info.info);

    out
}

pub fn render_suggest() -> String {
    Metric::ALL
        .iter()
        .map(|m| format!("{}\n", m.name()))
        .collect()
}
