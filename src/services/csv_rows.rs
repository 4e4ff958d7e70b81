//! CSV row parser for per-symbol series blobs
//!
//! Expects a header row naming `Date, Open, High, Low, Close, Volume` (any
//! order, any case). Rows missing any of the six fields, or failing to parse,
//! are dropped silently; a bad row never kills the stream.

use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;
use tracing::debug;

use crate::error::Result;
use crate::models::{Ohlcv, Series};

struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Some(Self {
            date: find("Date")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
            volume: find("Volume")?,
        })
    }
}

/// Parse raw CSV bytes into OHLCV records.
///
/// A header row that lacks any of the six columns makes every data row
/// incomplete, so the result is an empty series rather than an error.
pub fn parse_series(bytes: &[u8]) -> Result<Series> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader.headers()?.clone();

    let columns = match Columns::locate(&headers) {
        Some(columns) => columns,
        None => {
            debug!("series CSV is missing one or more OHLCV columns, returning empty series");
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("dropping malformed CSV row: {}", e);
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Some(row) => records.push(row),
            None => debug!("dropping row with missing or unparseable fields"),
        }
    }

    Ok(records)
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Option<Ohlcv> {
    let time = parse_date(field(record, columns.date)?)?;
    let open = field(record, columns.open)?.parse::<f64>().ok()?;
    let high = field(record, columns.high)?.parse::<f64>().ok()?;
    let low = field(record, columns.low)?.parse::<f64>().ok()?;
    let close = field(record, columns.close)?.parse::<f64>().ok()?;
    let volume = parse_volume(field(record, columns.volume)?)?;

    Some(Ohlcv::new(time, open, high, low, close, volume))
}

fn field<'a>(record: &'a StringRecord, index: usize) -> Option<&'a str> {
    let value = record.get(index)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Calendar date at UTC midnight
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn parse_volume(value: &str) -> Option<u64> {
    value
        .parse::<u64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}
