use chrono::NaiveDate;
use stockpos_api::types::ChartResponse;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_chart_full() {
    let json = load_fixture("chart.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.chart.error.is_none());

    let results = resp.chart.result.unwrap();
    assert_eq!(results.len(), 1);

    let chart = &results[0];
    assert_eq!(chart.meta.symbol, "AAPL");
    assert_eq!(chart.meta.currency.as_deref(), Some("USD"));
    assert_eq!(chart.meta.exchange_name.as_deref(), Some("NMS"));
    assert_eq!(chart.meta.long_name.as_deref(), Some("Apple Inc."));
    assert_eq!(chart.meta.regular_market_price, Some(216.67));
    assert_eq!(chart.timestamp.len(), 4);
    assert_eq!(chart.display_name().as_deref(), Some("Apple Inc."));
}

#[test]
fn bars_skip_null_sessions() {
    let json = load_fixture("chart.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    let results = resp.chart.result.unwrap();
    let bars = results[0].bars();

    // The fixture has four timestamps; the third session is all nulls.
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
    assert_eq!(bars[2].date, NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
    assert_eq!(bars[0].low, 206.9);
    assert_eq!(bars[0].high, 220.2);
    assert_eq!(bars[2].close, 216.67);
    assert_eq!(bars[2].volume, Some(93728300));
}

#[test]
fn deserialize_chart_error_envelope() {
    let json = load_fixture("chart_error.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.chart.result.is_none());

    let failure = resp.chart.error.unwrap();
    assert_eq!(failure.code, "Not Found");
    assert!(failure.description.contains("delisted"));
}
