//! Dashboard rows: candles plus optional SMA columns.
//!
//! Indicator values are derived from the *filtered* series, so a narrow date
//! range shows leading gaps instead of pulling closes from outside the range.

use crate::data::candle::PriceSeries;
use crate::data::Candle;
use crate::indicators::sma::{calculate_sma, SMA_LONG, SMA_SHORT};

/// One rendered row: the bar itself and the two rolling means, when attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub candle: Candle,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
}

/// Rows without indicator columns (SMA toggle off).
pub fn plain_rows(series: &PriceSeries) -> Vec<TableRow> {
    series
        .candles()
        .iter()
        .cloned()
        .map(|candle| TableRow {
            candle,
            sma20: None,
            sma50: None,
        })
        .collect()
}

/// Last `n` rows, in chronological order.
pub fn tail_rows(rows: &[TableRow], n: usize) -> &[TableRow] {
    let skip = rows.len().saturating_sub(n);
    &rows[skip..]
}

/// Rows with SMA20/SMA50 computed over the series' closes.
///
/// The first 19 (resp. 49) rows carry no value since their trailing window
/// is not yet full.
pub fn attach_indicators(series: &PriceSeries) -> Vec<TableRow> {
    let closes = series.closes();
    let sma20 = calculate_sma(&closes, SMA_SHORT);
    let sma50 = calculate_sma(&closes, SMA_LONG);

    series
        .candles()
        .iter()
        .cloned()
        .zip(sma20)
        .zip(sma50)
        .map(|((candle, sma20), sma50)| TableRow {
            candle,
            sma20,
            sma50,
        })
        .collect()
}
