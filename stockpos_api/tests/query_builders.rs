use chrono::NaiveDate;
use stockpos_api::{ChartQuery, ChartWindow, Interval};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/v8/finance/chart/AAPL").unwrap()
}

#[test]
fn chart_query_defaults() {
    let query = ChartQuery::new("AAPL");
    assert_eq!(query.window, ChartWindow::Lookback(365));
    assert_eq!(query.interval, Interval::Daily);

    let url = query.add_to_url(&base_url());
    let qs = url.query().unwrap();
    assert!(qs.contains("range=365d"));
    assert!(qs.contains("interval=1d"));
    assert!(!qs.contains("events"));
}

#[test]
fn chart_query_absolute_range() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    let url = ChartQuery::new("AAPL")
        .with_range(start, end)
        .add_to_url(&base_url());
    let qs = url.query().unwrap();

    // 2024-06-12 00:00 UTC; period2 is the midnight after the inclusive end.
    assert!(qs.contains("period1=1718150400"));
    assert!(qs.contains("period2=1718409600"));
    assert!(!qs.contains("range="));
}

#[test]
fn chart_query_lookback() {
    let url = ChartQuery::new("AAPL")
        .with_lookback_days(5)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("range=5d"));
}

#[test]
fn chart_query_interval_variants() {
    let url = ChartQuery::new("AAPL")
        .with_interval(Interval::Weekly)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("interval=1wk"));

    let url = ChartQuery::new("AAPL")
        .with_interval(Interval::Monthly)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("interval=1mo"));
}

#[test]
fn chart_query_with_events() {
    let url = ChartQuery::new("AAPL").with_events().add_to_url(&base_url());
    assert!(url.query().unwrap().contains("events=div%2Csplit"));
}
