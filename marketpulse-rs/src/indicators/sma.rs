//! SMA (Simple Moving Average) indicator

use crate::indicators::Indicator;
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// Window of the short dashboard average (SMA20).
pub const SMA_SHORT: usize = 20;
/// Window of the long dashboard average (SMA50).
pub const SMA_LONG: usize = 50;

/// SMA indicator wrapper.
///
/// Reports no value until a full trailing window has been seen, so early
/// rows of a filtered series stay blank instead of averaging a short head.
#[derive(Debug)]
pub struct SMA {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Self {
        Self {
            inner: SimpleMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Rolling mean over a series of closes, one slot per input value.
///
/// Slot `i` holds the mean of `values[i + 1 - period ..= i]` once `i` reaches
/// `period - 1`, and `None` before that.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = SMA::new(period);
    values
        .iter()
        .map(|&value| {
            sma.update(value);
            sma.value()
        })
        .collect()
}
