//! Yahoo Finance chart API client.
//!
//! One GET per (symbol, interval) selection; the response carries parallel
//! arrays of epoch timestamps and OHLCV quotes. No retry and no caching:
//! every render pass fetches fresh.

use crate::config::Config;
use crate::data::{Candle, PriceSeries};
use crate::fetch::Interval;
use crate::Result;
use chrono::{DateTime, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// HTTP client bound to one Yahoo Finance host.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent("marketpulse/0.1")
            .build()?;

        Ok(Self {
            http,
            base_url: config.yahoo_base_url.clone(),
        })
    }

    /// Fetch historical bars for one symbol at the interval's fixed
    /// (lookback, granularity) pair.
    pub async fn fetch_history(&self, symbol: &str, interval: Interval) -> Result<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url,
            symbol,
            interval.period(),
            interval.granularity()
        );

        let envelope: ChartEnvelope = self.http.get(&url).send().await?.json().await?;
        let series = parse_series(envelope);
        info!(
            "Fetched {} {} bars for {}",
            series.len(),
            interval.granularity(),
            symbol
        );
        Ok(series)
    }

    /// Fetch, collapsing every failure into the one NoData condition the
    /// dashboard knows how to display.
    pub async fn fetch_or_empty(&self, symbol: &str, interval: Interval) -> PriceSeries {
        match self.fetch_history(symbol, interval).await {
            Ok(series) => series,
            Err(e) => {
                warn!("[{symbol}] fetch failed, treating as no data: {e}");
                PriceSeries::new()
            }
        }
    }
}

// `chart` response schema
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartPayload,
}

#[derive(Debug, Deserialize)]
pub struct ChartPayload {
    pub result: Option<Vec<ChartData>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<QuoteBlock>,
}

/// Parallel arrays, one slot per timestamp; Yahoo reports halted or partial
/// bars as nulls.
#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Turn a chart response into a series.
///
/// Epoch seconds become naive timestamps with the timezone dropped, then
/// land on their calendar date at midnight: Yahoo stamps bars with the
/// market-open time, which would disagree with the date-keyed filter, the
/// table and the CSV. Rows with any missing field are skipped, and an
/// absent `result` yields the empty series rather than an error.
pub fn parse_series(envelope: ChartEnvelope) -> PriceSeries {
    let data = match envelope.chart.result {
        Some(mut results) if !results.is_empty() => results.remove(0),
        _ => return PriceSeries::new(),
    };
    let quote = match data.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None => return PriceSeries::new(),
    };

    let mut candles = Vec::with_capacity(data.timestamp.len());
    for (i, &ts) in data.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            slot(&quote.open, i),
            slot(&quote.high, i),
            slot(&quote.low, i),
            slot(&quote.close, i),
            slot(&quote.volume, i),
        ) else {
            continue;
        };
        let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        candles.push(Candle::new(
            timestamp.date_naive().and_time(NaiveTime::MIN),
            open,
            high,
            low,
            close,
            volume,
        ));
    }

    PriceSeries::from_vec(candles)
}

fn slot(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}
