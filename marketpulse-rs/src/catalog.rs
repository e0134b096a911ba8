//! Fixed catalog of selectable tickers.
//!
//! The dashboard only ever offers these 15 companies: 10 US-listed plus
//! 5 NSE-listed. Selection widgets enumerate the catalog, so every symbol
//! reaching the fetcher is a member by construction.

/// Human-readable label paired with the exchange symbol.
pub const TICKERS: [(&str, &str); 15] = [
    // US stocks
    ("Apple (AAPL)", "AAPL"),
    ("Microsoft (MSFT)", "MSFT"),
    ("Tesla (TSLA)", "TSLA"),
    ("Amazon (AMZN)", "AMZN"),
    ("Google (GOOGL)", "GOOGL"),
    ("Meta (META)", "META"),
    ("NVIDIA (NVDA)", "NVDA"),
    ("Netflix (NFLX)", "NFLX"),
    ("Intel (INTC)", "INTC"),
    ("AMD (AMD)", "AMD"),
    // Indian stocks (NSE)
    ("Wipro (WIPRO.NS)", "WIPRO.NS"),
    ("Infosys (INFY.NS)", "INFY.NS"),
    ("TCS (TCS.NS)", "TCS.NS"),
    ("HDFC Bank (HDFCBANK.NS)", "HDFCBANK.NS"),
    ("Reliance (RELIANCE.NS)", "RELIANCE.NS"),
];

/// Symbol for a given label, if the label is catalogued.
pub fn lookup(label: &str) -> Option<&'static str> {
    TICKERS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, symbol)| *symbol)
}

/// The catalog's own copy of a symbol, or `None` for anything uncatalogued.
/// Pins query-supplied strings to the closed set of 15.
pub fn canonical(symbol: &str) -> Option<&'static str> {
    TICKERS
        .iter()
        .find(|(_, s)| *s == symbol)
        .map(|(_, s)| *s)
}

/// First catalog entry, used as the default selection.
pub fn default_symbol() -> &'static str {
    TICKERS[0].1
}
