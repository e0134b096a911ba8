//! MarketPulse: domain library for an interactive stock dashboard
//!
//! This crate provides everything the dashboard server composes per request:
//! - **Catalog**: the fixed set of selectable tickers
//! - **Fetch**: historical OHLCV bars from Yahoo Finance's chart API
//! - **Data**: price series, date-range filtering and CSV export
//! - **Indicators**: SMA20/SMA50 via [ta-rs](https://github.com/greyblake/ta-rs)
//! - **Chart**: Plotly figure JSON for candlestick/line/area views
//!
//! # Example
//!
//! ```no_run
//! use marketpulse_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let client = YahooClient::new(&config)?;
//!     let series = client.fetch_history("AAPL", Interval::Daily).await?;
//!     let rows = attach_indicators(&series);
//!     let figure = build_figure(ChartType::Candlestick, &rows, true);
//!     println!("{figure}");
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chart;
pub mod config;
pub mod data;
pub mod fetch;
pub mod indicators;

// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog;
    pub use crate::chart::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::fetch::*;
    pub use crate::indicators::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
