//! CSV export of the filtered series.

use crate::data::table::TableRow;
use crate::fetch::Interval;
use crate::Result;

/// Download filename for a given selection, e.g. `AAPL_Daily_data.csv`.
pub fn export_filename(symbol: &str, interval: Interval) -> String {
    format!("{}_{}_data.csv", symbol, interval.as_str())
}

/// Encode rows as UTF-8 CSV.
///
/// Column order is `Date,Open,High,Low,Close,Volume`, extended with
/// `SMA20,SMA50` when indicators were attached. Absent indicator values
/// (rows before the window fills) become empty fields. Dates serialize as
/// plain `YYYY-MM-DD`; the fetcher pins bars to midnight, so re-parsing an
/// export reproduces the in-memory series exactly.
pub fn write_csv(rows: &[TableRow], include_sma: bool) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if include_sma {
        writer.write_record([
            "Date", "Open", "High", "Low", "Close", "Volume", "SMA20", "SMA50",
        ])?;
    } else {
        writer.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])?;
    }

    for row in rows {
        let c = &row.candle;
        let mut record = vec![
            c.timestamp.format("%Y-%m-%d").to_string(),
            c.open.to_string(),
            c.high.to_string(),
            c.low.to_string(),
            c.close.to_string(),
            c.volume.to_string(),
        ];
        if include_sma {
            record.push(optional_field(row.sma20));
            record.push(optional_field(row.sma50));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(writer.into_inner()?)
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
