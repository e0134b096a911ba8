//! OHLCV price series, derived dashboard rows and CSV export.

pub mod candle;
pub mod export;
pub mod table;

pub use candle::{Candle, PriceSeries};
pub use export::{export_filename, write_csv};
pub use table::{attach_indicators, plain_rows, tail_rows, TableRow};
