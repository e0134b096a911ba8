//! Request handlers for the dashboard page, CSV download and health check.
//!
//! Every page request is one linear pass: resolve the selection from query
//! parameters, fetch, filter, derive indicators, render. Nothing survives
//! the request; the only shared state is the HTTP client.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use marketpulse_rs::catalog;
use marketpulse_rs::chart::{build_figure, volume_figure, ChartType};
use marketpulse_rs::data::{
    attach_indicators, export_filename, plain_rows, tail_rows, write_csv, PriceSeries, TableRow,
};
use marketpulse_rs::fetch::{Interval, YahooClient};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub client: YahooClient,
}

/// Raw query parameters; every field is optional so a bare `/` renders the
/// default view.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub symbol: Option<String>,
    pub interval: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub chart: Option<String>,
    pub sma: Option<String>,
}

/// Validated selection. Unknown values fall back to the defaults, so the
/// catalog and the two enums bound everything downstream by construction.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub symbol: &'static str,
    pub interval: Interval,
    pub chart: ChartType,
    pub show_sma: bool,
}

impl Selection {
    pub fn resolve(q: &DashboardQuery) -> Self {
        let symbol = q
            .symbol
            .as_deref()
            .and_then(catalog::canonical)
            .unwrap_or_else(catalog::default_symbol);
        let interval = q
            .interval
            .as_deref()
            .and_then(Interval::from_str)
            .unwrap_or(Interval::Daily);
        let chart = q
            .chart
            .as_deref()
            .and_then(ChartType::from_str)
            .unwrap_or(ChartType::Candlestick);
        // An unchecked box is simply absent from the query, so the toggle
        // defaults on only when no form was submitted at all.
        let show_sma = match q.sma.as_deref() {
            Some(v) => v == "on",
            None => q.symbol.is_none(),
        };

        Self {
            symbol,
            interval,
            chart,
            show_sma,
        }
    }
}

/// Request-scoped context carried from fetch through filter to render.
pub struct RenderContext {
    pub selection: Selection,
    pub series: PriceSeries,
}

impl RenderContext {
    /// Filtered rows for the clamped `[start, end]` range, with indicator
    /// columns when the toggle is on.
    pub fn rows(&self, start: NaiveDate, end: NaiveDate) -> Vec<TableRow> {
        let filtered = self.series.filter_range(start, end);
        if self.selection.show_sma {
            attach_indicators(&filtered)
        } else {
            plain_rows(&filtered)
        }
    }
}

const NO_DATA_MESSAGE: &str = "Could not fetch stock data.";

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    tickers: Vec<(&'static str, &'static str)>,
    selected_symbol: &'static str,
    intervals: Vec<(&'static str, bool)>,
    charts: Vec<(&'static str, bool)>,
    show_sma: bool,
    start: String,
    end: String,
    min_date: String,
    max_date: String,
    has_data: bool,
    warning: &'static str,
    figure_json: String,
    volume_json: String,
    rows: Vec<DisplayRow>,
    export_url: String,
}

impl DashboardTemplate {
    fn controls(selection: &Selection) -> Self {
        Self {
            tickers: catalog::TICKERS.to_vec(),
            selected_symbol: selection.symbol,
            intervals: Interval::ALL
                .iter()
                .map(|iv| (iv.as_str(), *iv == selection.interval))
                .collect(),
            charts: ChartType::ALL
                .iter()
                .map(|ct| (ct.as_str(), *ct == selection.chart))
                .collect(),
            show_sma: selection.show_sma,
            start: String::new(),
            end: String::new(),
            min_date: String::new(),
            max_date: String::new(),
            has_data: false,
            warning: NO_DATA_MESSAGE,
            figure_json: String::new(),
            volume_json: String::new(),
            rows: Vec::new(),
            export_url: String::new(),
        }
    }
}

/// One table row, already formatted for display.
pub struct DisplayRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub sma20: String,
    pub sma50: String,
    pub bullish: bool,
}

impl DisplayRow {
    fn from_row(row: &TableRow) -> Self {
        let c = &row.candle;
        Self {
            date: c.timestamp.format("%Y-%m-%d").to_string(),
            open: format!("{:.2}", c.open),
            high: format!("{:.2}", c.high),
            low: format!("{:.2}", c.low),
            close: format!("{:.2}", c.close),
            volume: format!("{:.0}", c.volume),
            sma20: format_sma(row.sma20),
            sma50: format_sma(row.sma50),
            bullish: c.is_bullish(),
        }
    }
}

fn format_sma(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

/// GET / — the dashboard page.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(q): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let selection = Selection::resolve(&q);
    let series = state
        .client
        .fetch_or_empty(selection.symbol, selection.interval)
        .await;
    let ctx = RenderContext { selection, series };

    let template = match (ctx.series.min_date(), ctx.series.max_date()) {
        (Some(min), Some(max)) => {
            let (start, end) = clamp_range(q.start.as_deref(), q.end.as_deref(), min, max);
            let rows = ctx.rows(start, end);
            let figure = build_figure(selection.chart, &rows, selection.show_sma);
            let volume = volume_figure(&rows);

            let table_rows = tail_rows(&rows, 10)
                .iter()
                .map(DisplayRow::from_row)
                .collect();

            DashboardTemplate {
                start: start.to_string(),
                end: end.to_string(),
                min_date: min.to_string(),
                max_date: max.to_string(),
                has_data: true,
                figure_json: figure.to_string(),
                volume_json: volume.to_string(),
                rows: table_rows,
                export_url: export_url(&selection, start, end),
                ..DashboardTemplate::controls(&selection)
            }
        }
        _ => DashboardTemplate::controls(&selection),
    };

    Ok(Html(template.render()?))
}

/// GET /export — the filtered series as a CSV attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(q): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let selection = Selection::resolve(&q);
    let series = state
        .client
        .fetch_or_empty(selection.symbol, selection.interval)
        .await;
    let ctx = RenderContext { selection, series };

    let (Some(min), Some(max)) = (ctx.series.min_date(), ctx.series.max_date()) else {
        return Ok((StatusCode::NOT_FOUND, NO_DATA_MESSAGE).into_response());
    };

    let (start, end) = clamp_range(q.start.as_deref(), q.end.as_deref(), min, max);
    let rows = ctx.rows(start, end);
    let body = write_csv(&rows, selection.show_sma)?;
    let filename = export_filename(selection.symbol, selection.interval);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, body).into_response())
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Clamp the requested range into the fetched extent; both bounds inclusive.
/// Query values are unbounded text, so out-of-range or reversed dates are
/// pulled back instead of rejected.
fn clamp_range(
    start: Option<&str>,
    end: Option<&str>,
    min: NaiveDate,
    max: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let parse = |s: Option<&str>| s.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    let mut start = parse(start).unwrap_or(min).clamp(min, max);
    let mut end = parse(end).unwrap_or(max).clamp(min, max);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    (start, end)
}

fn export_url(selection: &Selection, start: NaiveDate, end: NaiveDate) -> String {
    let mut url = format!(
        "/export?symbol={}&interval={}&start={}&end={}",
        selection.symbol,
        selection.interval.as_str(),
        start,
        end
    );
    if selection.show_sma {
        url.push_str("&sma=on");
    }
    url
}

/// Adapter so handler plumbing can use `?` on anyhow-compatible errors.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let selection = Selection::resolve(&DashboardQuery::default());
        assert_eq!(selection.symbol, "AAPL");
        assert_eq!(selection.interval, Interval::Daily);
        assert_eq!(selection.chart, ChartType::Candlestick);
        // Fresh load: indicators default on.
        assert!(selection.show_sma);
    }

    #[test]
    fn resolve_rejects_unknown_symbol() {
        let q = DashboardQuery {
            symbol: Some("EVIL'; DROP".to_string()),
            ..Default::default()
        };
        assert_eq!(Selection::resolve(&q).symbol, "AAPL");
    }

    #[test]
    fn resolve_accepts_catalog_symbol() {
        let q = DashboardQuery {
            symbol: Some("WIPRO.NS".to_string()),
            interval: Some("Monthly".to_string()),
            chart: Some("Area".to_string()),
            ..Default::default()
        };
        let selection = Selection::resolve(&q);
        assert_eq!(selection.symbol, "WIPRO.NS");
        assert_eq!(selection.interval, Interval::Monthly);
        assert_eq!(selection.chart, ChartType::Area);
        // Submitted form without the checkbox: toggle off.
        assert!(!selection.show_sma);
    }

    #[test]
    fn clamp_range_defaults_to_extent() {
        let (min, max) = (date("2025-01-01"), date("2025-06-30"));
        assert_eq!(clamp_range(None, None, min, max), (min, max));
    }

    #[test]
    fn clamp_range_pulls_outliers_back() {
        let (min, max) = (date("2025-01-01"), date("2025-06-30"));
        let (start, end) = clamp_range(Some("2020-01-01"), Some("2030-01-01"), min, max);
        assert_eq!((start, end), (min, max));
    }

    #[test]
    fn clamp_range_swaps_reversed_bounds() {
        let (min, max) = (date("2025-01-01"), date("2025-06-30"));
        let (start, end) = clamp_range(Some("2025-03-01"), Some("2025-02-01"), min, max);
        assert_eq!(start, date("2025-02-01"));
        assert_eq!(end, date("2025-03-01"));
    }

    #[test]
    fn no_data_template_renders_warning() {
        let selection = Selection::resolve(&DashboardQuery::default());
        let html = DashboardTemplate::controls(&selection).render().unwrap();
        assert!(html.contains("Could not fetch stock data."));
        assert!(!html.contains("Plotly.newPlot"));
    }

    #[test]
    fn controls_mark_selected_options() {
        let q = DashboardQuery {
            symbol: Some("TSLA".to_string()),
            interval: Some("Monthly".to_string()),
            chart: Some("Area".to_string()),
            ..Default::default()
        };
        let selection = Selection::resolve(&q);
        let html = DashboardTemplate::controls(&selection).render().unwrap();
        assert!(html.contains(r#"value="Monthly" checked"#));
        assert!(html.contains(r#"value="Area" checked"#));
        assert!(!html.contains(r#"value="Daily" checked"#));
        assert!(!html.contains(r#"value="Candlestick" checked"#));
    }

    #[test]
    fn export_url_carries_selection() {
        let q = DashboardQuery {
            symbol: Some("TSLA".to_string()),
            sma: Some("on".to_string()),
            ..Default::default()
        };
        let selection = Selection::resolve(&q);
        let url = export_url(&selection, date("2025-01-02"), date("2025-03-04"));
        assert_eq!(
            url,
            "/export?symbol=TSLA&interval=Daily&start=2025-01-02&end=2025-03-04&sma=on"
        );
    }
}
