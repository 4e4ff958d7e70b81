//! Blob Naming Constants
//!
//! Stored blob names use a literal backslash between the symbol and the
//! filename (`VCB\stock.csv`). The separator is part of the on-store contract:
//! assets were ingested under these names, and rewriting it to a forward
//! slash would make every existing blob unreachable.

/// Filename of the per-symbol OHLCV series blob
pub const SERIES_FILENAME: &str = "stock.csv";

/// Separator between the symbol and the filename inside a blob name
pub const BLOB_NAME_SEPARATOR: char = '\\';

/// Default HTTP port when neither `--port` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 10000;

/// Default page size for the company directory listing
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current page in the page-link row
pub const PAGE_WINDOW_RADIUS: usize = 2;

/// Blob name of the series CSV for a symbol (`{SYMBOL}\stock.csv`)
pub fn series_blob_name(symbol: &str) -> String {
    format!("{}{}{}", symbol, BLOB_NAME_SEPARATOR, SERIES_FILENAME)
}

/// Blob name of a prediction asset (`{symbol}\{filename}`)
pub fn prediction_blob_name(symbol: &str, filename: &str) -> String {
    format!("{}{}{}", symbol, BLOB_NAME_SEPARATOR, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_blob_name_uses_backslash() {
        assert_eq!(series_blob_name("VCB"), "VCB\\stock.csv");
    }

    #[test]
    fn test_prediction_blob_name() {
        assert_eq!(
            prediction_blob_name("FPT", "LSTM_metrics.txt"),
            "FPT\\LSTM_metrics.txt"
        );
    }
}
