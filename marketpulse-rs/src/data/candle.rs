//! OHLCV candle data structures

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
///
/// Timestamps are naive: the fetcher strips the exchange timezone so bars
/// compare directly against user-supplied plain dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar timestamp (timezone already removed)
    pub timestamp: NaiveDateTime,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calendar date of the bar
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// An ordered-by-timestamp collection of candles for one symbol.
///
/// Built fresh on every fetch and discarded after the render pass; ordering
/// is guaranteed by the upstream provider and not re-validated here.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Create new empty series
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Create from vector of candles
    pub fn from_vec(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Earliest bar date
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.candles.first().map(Candle::date)
    }

    /// Latest bar date
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.candles.last().map(Candle::date)
    }

    /// Keep bars whose date lies within `[start, end]`, inclusive on both
    /// boundaries.
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let candles = self
            .candles
            .iter()
            .filter(|c| c.date() >= start && c.date() <= end)
            .cloned()
            .collect();
        Self { candles }
    }
}

impl From<Vec<Candle>> for PriceSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::from_vec(candles)
    }
}
