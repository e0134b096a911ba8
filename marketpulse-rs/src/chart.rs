//! Plotly figure construction.
//!
//! The server builds complete figure JSON (traces plus layout); the page
//! only hands it to `Plotly.newPlot`. One `match` on [`ChartType`] decides
//! the shape of the price figure.

use crate::data::TableRow;
use serde_json::{json, Value};

/// Dashboard chart styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Candlestick,
    Line,
    Area,
}

impl ChartType {
    /// All chart types, in display order.
    pub const ALL: [ChartType; 3] = [ChartType::Candlestick, ChartType::Line, ChartType::Area];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Candlestick" => Some(Self::Candlestick),
            "Line" => Some(Self::Line),
            "Area" => Some(Self::Area),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candlestick => "Candlestick",
            Self::Line => "Line",
            Self::Area => "Area",
        }
    }
}

/// Price figure for the selected chart type.
///
/// The candlestick trace always renders; the SMA toggle only adds or removes
/// the two overlay lines. Absent SMA values serialize as JSON nulls, which
/// Plotly draws as gaps.
pub fn build_figure(chart: ChartType, rows: &[TableRow], show_sma: bool) -> Value {
    let x = dates(rows);
    let closes: Vec<f64> = rows.iter().map(|r| r.candle.close).collect();

    match chart {
        ChartType::Candlestick => {
            let mut data = vec![json!({
                "type": "candlestick",
                "x": x.clone(),
                "open": rows.iter().map(|r| r.candle.open).collect::<Vec<_>>(),
                "high": rows.iter().map(|r| r.candle.high).collect::<Vec<_>>(),
                "low": rows.iter().map(|r| r.candle.low).collect::<Vec<_>>(),
                "close": closes,
                "name": "Candlestick",
            })];
            if show_sma {
                data.push(json!({
                    "type": "scatter",
                    "mode": "lines",
                    "x": x.clone(),
                    "y": rows.iter().map(|r| r.sma20).collect::<Vec<_>>(),
                    "name": "SMA 20",
                    "line": { "color": "blue" },
                }));
                data.push(json!({
                    "type": "scatter",
                    "mode": "lines",
                    "x": x,
                    "y": rows.iter().map(|r| r.sma50).collect::<Vec<_>>(),
                    "name": "SMA 50",
                    "line": { "color": "orange" },
                }));
            }

            let mut layout = light_layout();
            layout["xaxis"] = json!({ "rangeslider": { "visible": false } });
            json!({ "data": data, "layout": layout })
        }
        ChartType::Line => json!({
            "data": [{
                "type": "scatter",
                "mode": "lines",
                "x": x,
                "y": closes,
                "name": "Close",
            }],
            "layout": light_layout(),
        }),
        ChartType::Area => json!({
            "data": [{
                "type": "scatter",
                "mode": "lines",
                "fill": "tozeroy",
                "x": x,
                "y": closes,
                "name": "Close",
            }],
            "layout": light_layout(),
        }),
    }
}

/// Volume bar figure, rendered independently of the chart type.
pub fn volume_figure(rows: &[TableRow]) -> Value {
    json!({
        "data": [{
            "type": "bar",
            "x": dates(rows),
            "y": rows.iter().map(|r| r.candle.volume).collect::<Vec<_>>(),
            "name": "Volume",
        }],
        "layout": light_layout(),
    })
}

fn dates(rows: &[TableRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.candle.timestamp.format("%Y-%m-%d").to_string())
        .collect()
}

// Light visual theme shared by all figures.
fn light_layout() -> Value {
    json!({
        "paper_bgcolor": "#ffffff",
        "plot_bgcolor": "#ffffff",
        "margin": { "t": 32, "r": 16 },
    })
}
