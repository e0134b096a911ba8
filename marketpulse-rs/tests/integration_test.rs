//! Integration tests for marketpulse-rs

use chrono::{Duration, NaiveDate, NaiveDateTime};
use marketpulse_rs::chart::{build_figure, volume_figure, ChartType};
use marketpulse_rs::data::{attach_indicators, plain_rows, write_csv, Candle, PriceSeries};
use marketpulse_rs::fetch::yahoo::{parse_series, ChartEnvelope};

/// Helper function to create daily test candles
fn create_test_candles(count: usize, base_price: f64) -> Vec<Candle> {
    let base_time: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * 0.1) + (i as f64 % 10.0) * 0.5;
            Candle::new(
                base_time + Duration::days(i as i64),
                price,
                price + 1.0,
                price - 1.0,
                price + 0.25,
                1000.0 + i as f64,
            )
        })
        .collect()
}

#[test]
fn test_full_render_pass() {
    // fetch -> filter -> derive -> figure, the way one page request runs.
    let series = PriceSeries::from_vec(create_test_candles(120, 100.0));
    let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    let filtered = series.filter_range(start, end);
    assert!(filtered.len() < series.len());
    assert!(filtered.min_date().unwrap() >= start);
    assert!(filtered.max_date().unwrap() <= end);

    let rows = attach_indicators(&filtered);
    assert_eq!(rows.len(), filtered.len());

    // Windows run over the filtered series only: the first 19/49 rows gap.
    assert!(rows[18].sma20.is_none());
    assert!(rows[19].sma20.is_some());
    assert!(rows[48].sma50.is_none());
    assert!(rows[49].sma50.is_some());

    let figure = build_figure(ChartType::Candlestick, &rows, true);
    assert_eq!(figure["data"].as_array().unwrap().len(), 3);

    let volume = volume_figure(&rows);
    assert_eq!(volume["data"][0]["type"], "bar");
    assert_eq!(
        volume["data"][0]["y"].as_array().unwrap().len(),
        rows.len()
    );
}

#[test]
fn test_candlestick_renders_without_indicators() {
    // The SMA toggle must only control the overlays, never the chart itself.
    let series = PriceSeries::from_vec(create_test_candles(30, 100.0));
    let rows = plain_rows(&series);

    let figure = build_figure(ChartType::Candlestick, &rows, false);
    let data = figure["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["type"], "candlestick");
    assert_eq!(
        figure["layout"]["xaxis"]["rangeslider"]["visible"],
        serde_json::json!(false)
    );
}

#[test]
fn test_sma_overlays_on_candlestick() {
    let series = PriceSeries::from_vec(create_test_candles(60, 100.0));
    let rows = attach_indicators(&series);

    let figure = build_figure(ChartType::Candlestick, &rows, true);
    let data = figure["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[1]["name"], "SMA 20");
    assert_eq!(data[2]["name"], "SMA 50");
    // Leading gap rows serialize as nulls so Plotly leaves gaps.
    assert!(data[1]["y"][0].is_null());
    assert!(data[1]["y"][59].is_number());
}

#[test]
fn test_line_and_area_figures() {
    let series = PriceSeries::from_vec(create_test_candles(20, 100.0));
    let rows = plain_rows(&series);

    let line = build_figure(ChartType::Line, &rows, false);
    assert_eq!(line["data"].as_array().unwrap().len(), 1);
    assert_eq!(line["data"][0]["mode"], "lines");
    assert!(line["data"][0]["fill"].is_null());

    let area = build_figure(ChartType::Area, &rows, false);
    assert_eq!(area["data"][0]["fill"], "tozeroy");
}

#[test]
fn test_empty_series_short_circuits() {
    let series = PriceSeries::new();
    assert!(series.is_empty());
    assert_eq!(series.min_date(), None);
    assert_eq!(series.max_date(), None);

    // Nothing downstream has anything to do.
    let rows = plain_rows(&series);
    assert!(rows.is_empty());
    let csv = write_csv(&rows, false).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "Date,Open,High,Low,Close,Volume\n"
    );
}

#[test]
fn test_parse_yahoo_chart_payload() {
    // Three slots stamped at the 14:30 UTC market open; the middle bar is
    // incomplete and must be dropped.
    let body = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "exchangeTimezoneName": "America/New_York" },
                "timestamp": [1704119400, 1704205800, 1704292200],
                "indicators": {
                    "quote": [{
                        "open":   [185.0, null, 187.0],
                        "high":   [186.5, 187.0, 188.2],
                        "low":    [184.1, 185.5, 186.0],
                        "close":  [186.0, null, 188.0],
                        "volume": [50000000, 48000000, 51000000]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
    let series = parse_series(envelope);

    assert_eq!(series.len(), 2);
    // Timezone stripped and the bar pinned to its calendar date.
    assert_eq!(
        series.candles()[0].timestamp,
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
    assert_eq!(series.candles()[1].close, 188.0);
    assert_eq!(series.candles()[1].volume, 51000000.0);
}

#[test]
fn test_csv_round_trip_after_intraday_fetch() {
    // Provider bars arrive stamped intraday; what the CSV says must still
    // re-parse to exactly the in-memory series.
    let body = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704119400, 1704205800],
                "indicators": {
                    "quote": [{
                        "open":   [185.0, 186.0],
                        "high":   [186.5, 187.0],
                        "low":    [184.1, 185.5],
                        "close":  [186.0, 186.8],
                        "volume": [50000000, 48000000]
                    }]
                }
            }]
        }
    }"#;

    let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
    let series = parse_series(envelope);
    let rows = plain_rows(&series);
    let bytes = write_csv(&rows, false).unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let mut count = 0;
    for (record, row) in reader.records().zip(&rows) {
        let record = record.unwrap();
        let timestamp = NaiveDate::parse_from_str(&record[0], "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(timestamp, row.candle.timestamp);
        assert_eq!(record[4].parse::<f64>().unwrap(), row.candle.close);
        count += 1;
    }
    assert_eq!(count, rows.len());
}

#[test]
fn test_parse_yahoo_absent_result() {
    let body = r#"{ "chart": { "result": null, "error": { "code": "Not Found" } } }"#;
    let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
    assert!(parse_series(envelope).is_empty());

    let body = r#"{ "chart": { "result": [] } }"#;
    let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
    assert!(parse_series(envelope).is_empty());
}
