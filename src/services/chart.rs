//! Headless chart view state
//!
//! The logic half of the candlestick view: one series at a time, fixed
//! visible-range presets, and a crosshair read-out of the record nearest a
//! point in time. Range presets subtract a fixed number of seconds from the
//! last record's timestamp; this is calendar-naive on purpose (weekends,
//! trading gaps and leap days are ignored beyond the raw day count).

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

use crate::models::{Ohlcv, Series};

/// Fixed visible-range presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    All,
    OneYear,
    SixMonths,
    ThreeMonths,
    ThirtyDays,
}

impl RangePreset {
    pub const ALL_PRESETS: [RangePreset; 5] = [
        RangePreset::All,
        RangePreset::OneYear,
        RangePreset::SixMonths,
        RangePreset::ThreeMonths,
        RangePreset::ThirtyDays,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RangePreset::All => "All Time",
            RangePreset::OneYear => "1 Year",
            RangePreset::SixMonths => "6 Months",
            RangePreset::ThreeMonths => "3 Months",
            RangePreset::ThirtyDays => "30 Days",
        }
    }

    /// Width of the visible window in seconds; `None` fits the whole series
    pub fn span_secs(self) -> Option<i64> {
        let days = match self {
            RangePreset::All => return None,
            RangePreset::OneYear => 365,
            RangePreset::SixMonths => 182,
            RangePreset::ThreeMonths => 91,
            RangePreset::ThirtyDays => 30,
        };
        Some(days * 24 * 60 * 60)
    }
}

/// OHLC values of the record under the crosshair
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairReadout {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// View state over one series at a time
#[derive(Debug, Default)]
pub struct ChartView {
    data: Series,
    visible: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed series. The previous series and any applied
    /// range are dropped, so a symbol change never leaks old state.
    pub fn set_data(&mut self, series: Series) {
        self.data = series;
        self.visible = None;
    }

    pub fn data(&self) -> &[Ohlcv] {
        &self.data
    }

    /// Currently visible range; `None` means fit the whole series
    pub fn visible_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.visible
    }

    /// Apply a range preset anchored at the last record's timestamp.
    /// No-op on an empty series.
    pub fn apply_range(&mut self, preset: RangePreset) {
        let Some(last) = self.data.last() else {
            return;
        };

        self.visible = preset
            .span_secs()
            .map(|secs| (last.time - Duration::seconds(secs), last.time));
    }

    /// Read-out of the record nearest `at`, or `None` for an empty series
    pub fn crosshair(&self, at: DateTime<Utc>) -> Option<CrosshairReadout> {
        let nearest = self
            .data
            .iter()
            .min_by_key(|r| (r.time - at).num_seconds().abs())?;

        Some(CrosshairReadout {
            time: nearest.time,
            open: nearest.open,
            high: nearest.high,
            low: nearest.low,
            close: nearest.close,
        })
    }
}

/// Shared "currently selected symbol" state.
///
/// A single watch channel instead of an ad hoc mutable singleton: one writer,
/// any number of subscribers, subscribers always observe the latest value.
#[derive(Debug)]
pub struct SymbolSelection {
    tx: watch::Sender<Option<String>>,
}

impl SymbolSelection {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn select(&self, symbol: impl Into<String>) {
        self.tx.send_replace(Some(symbol.into()));
    }

    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for SymbolSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(secs: i64, close: f64) -> Ohlcv {
        Ohlcv::new(ts(secs), close - 1.0, close + 1.0, close - 2.0, close, 100)
    }

    #[test]
    fn test_range_presets_anchor_at_last_record() {
        let mut view = ChartView::new();
        view.set_data(vec![record(1_000_000, 10.0), record(2_000_000, 11.0)]);

        view.apply_range(RangePreset::ThirtyDays);
        let (from, to) = view.visible_range().unwrap();
        assert_eq!(to, ts(2_000_000));
        assert_eq!(from, ts(2_000_000 - 30 * 86_400));

        view.apply_range(RangePreset::OneYear);
        let (from, _) = view.visible_range().unwrap();
        assert_eq!(from, ts(2_000_000 - 365 * 86_400));
    }

    #[test]
    fn test_all_preset_fits_content() {
        let mut view = ChartView::new();
        view.set_data(vec![record(1_000, 10.0)]);
        view.apply_range(RangePreset::ThirtyDays);
        assert!(view.visible_range().is_some());

        view.apply_range(RangePreset::All);
        assert!(view.visible_range().is_none());
    }

    #[test]
    fn test_preset_spans() {
        assert_eq!(RangePreset::All.span_secs(), None);
        assert_eq!(RangePreset::OneYear.span_secs(), Some(365 * 86_400));
        assert_eq!(RangePreset::SixMonths.span_secs(), Some(182 * 86_400));
        assert_eq!(RangePreset::ThreeMonths.span_secs(), Some(91 * 86_400));
        assert_eq!(RangePreset::ThirtyDays.span_secs(), Some(30 * 86_400));
    }

    #[test]
    fn test_set_data_replaces_and_resets_range() {
        let mut view = ChartView::new();
        view.set_data(vec![record(100, 1.0), record(200, 2.0)]);
        view.apply_range(RangePreset::ThirtyDays);

        view.set_data(vec![record(300, 3.0)]);
        assert_eq!(view.data().len(), 1);
        assert!(view.visible_range().is_none());
    }

    #[test]
    fn test_crosshair_finds_nearest_record() {
        let mut view = ChartView::new();
        view.set_data(vec![record(100, 1.0), record(200, 2.0), record(400, 4.0)]);

        let readout = view.crosshair(ts(230)).unwrap();
        assert_eq!(readout.time, ts(200));
        assert_eq!(readout.close, 2.0);

        let readout = view.crosshair(ts(390)).unwrap();
        assert_eq!(readout.close, 4.0);
    }

    #[test]
    fn test_crosshair_on_empty_series() {
        let view = ChartView::new();
        assert!(view.crosshair(ts(0)).is_none());
    }

    #[test]
    fn test_apply_range_on_empty_series_is_noop() {
        let mut view = ChartView::new();
        view.apply_range(RangePreset::OneYear);
        assert!(view.visible_range().is_none());
    }

    #[tokio::test]
    async fn test_symbol_selection_broadcasts_latest_value() {
        let selection = SymbolSelection::new();
        let mut rx = selection.subscribe();

        assert_eq!(selection.current(), None);

        selection.select("AAPL");
        selection.select("MSFT");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_deref(), Some("MSFT"));
        assert_eq!(selection.current().as_deref(), Some("MSFT"));
    }
}
