//! Historical data fetching from Yahoo Finance.

pub mod yahoo;

pub use yahoo::YahooClient;

/// Bar granularity selectable on the dashboard.
///
/// Each interval is tied to a fixed lookback so one request always covers
/// the full window the chart displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// All intervals, in display order.
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Daily" => Some(Self::Daily),
            "Weekly" => Some(Self::Weekly),
            "Monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Lookback window passed to the provider.
    pub fn period(&self) -> &'static str {
        match self {
            Self::Daily => "6mo",
            Self::Weekly => "1y",
            Self::Monthly => "2y",
        }
    }

    /// Bar granularity passed to the provider.
    pub fn granularity(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }
}
