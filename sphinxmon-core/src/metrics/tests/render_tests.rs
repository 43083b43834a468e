use crate::metrics::{
    Metric, UnsupportedMetric, WindowAggregate, metric_value, render_config, render_suggest,
    render_value,
};
use pretty_assertions::assert_eq;

fn busy_window() -> WindowAggregate {
    WindowAggregate {
        query_count: 10,
        total_query_time: 5.0,
        total_results: 200,
        rebuild_count: 3,
        total_rebuild_duration: 100.0,
        ..WindowAggregate::new(300)
    }
}

#[test]
fn values_use_fixed_precision() {
    let agg = busy_window();

    assert_eq!(metric_value(Metric::QueryRate, &agg), "2.00");
    assert_eq!(metric_value(Metric::QueryTime, &agg), "0.5000");
    assert_eq!(metric_value(Metric::ResultsReturned, &agg), "20.0000");
    assert_eq!(metric_value(Metric::IndexRebuilds, &agg), "3");
    assert_eq!(metric_value(Metric::TimePerRebuild, &agg), "33.33");
}

#[test]
fn empty_window_reports_plain_zero() {
    let agg = WindowAggregate::new(300);

    for metric in Metric::ALL {
        assert_eq!(metric_value(metric, &agg), "0", "{metric}");
    }
}

#[test]
fn value_line_format() {
    assert_eq!(
        render_value(Metric::QueryRate, &busy_window()),
        "query_rate.value 2.00\n"
    );
}

#[test]
fn config_block_for_query_time() {
    // Act
    let out = render_config(Metric::QueryTime, "Sphinx", 300);

    // Assert
    assert_eq!(
        out,
        "graph_title Sphinx average query time\n\
         graph_vlabel seconds\n\
         graph_category Sphinx\n\
         graph_args --base 1000 -l 0\n\
         graph_info Average time spent executing a search query, measured over the last 300 seconds.\n\
         query_time.label avg query time\n\
         query_time.type GAUGE\n\
         query_time.min 0\n\
         query_time.info Average time spent executing a search query\n"
    );
}

#[test]
fn config_block_uses_configured_category() {
    let out = render_config(Metric::IndexRebuilds, "search", 60);

    assert!(out.contains("graph_category search\n"));
    assert!(out.contains("last 60 seconds"));
    assert!(out.contains("index_rebuilds.label rebuilds\n"));
}

#[test]
fn suggest_lists_every_metric() {
    assert_eq!(
        render_suggest(),
        "query_rate\nquery_time\nresults_returned\nindex_rebuilds\ntime_per_rebuild\n"
    );
}

#[test]
fn metric_names_round_trip() {
    for metric in Metric::ALL {
        assert_eq!(metric.name().parse::<Metric>(), Ok(metric));
    }
}

#[test]
fn unknown_metric_name_is_rejected() {
    assert_eq!(
        "queries".parse::<Metric>(),
        Err(UnsupportedMetric("queries".to_string()))
    );
    assert_eq!(
        "Query_Rate".parse::<Metric>(),
        Err(UnsupportedMetric("Query_Rate".to_string()))
    );
}
