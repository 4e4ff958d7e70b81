//! Metric classifier
//!
//! Maps a numeric error (RMSE/MAE) or goodness-of-fit (R²) value onto a
//! qualitative label. Error values are judged relative to the average close
//! of the currently loaded series; R² is judged on its raw value.

use serde::Serialize;
use std::fmt;

use crate::models::Ohlcv;

/// Qualitative accuracy label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl QualityLabel {
    /// Fixed help sentence shown as tooltip text next to the label
    pub fn describe(self) -> &'static str {
        match self {
            QualityLabel::Excellent => {
                "Predictions track the actual prices very closely; the model is highly reliable for this series."
            }
            QualityLabel::Good => {
                "Predictions follow the actual prices well, with small deviations on most days."
            }
            QualityLabel::Fair => {
                "Predictions capture the broad trend but miss the price level noticeably at times."
            }
            QualityLabel::Poor => {
                "Predictions deviate substantially from the actual prices; treat this model's output with caution."
            }
            QualityLabel::Unknown => {
                "Not enough data to judge this metric for the current series."
            }
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QualityLabel::Excellent => "Excellent",
            QualityLabel::Good => "Good",
            QualityLabel::Fair => "Fair",
            QualityLabel::Poor => "Poor",
            QualityLabel::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// Classify an absolute error value (RMSE or MAE) against a reference price.
///
/// The error is meaningless without scale, so it is judged as a ratio of the
/// reference price. An unusable reference (NaN or ≤ 0) or a NaN value yields
/// `Unknown`.
pub fn classify_error(value: f64, reference_price: f64) -> QualityLabel {
    if value.is_nan() || reference_price.is_nan() || reference_price <= 0.0 {
        return QualityLabel::Unknown;
    }

    let ratio = value / reference_price;
    if ratio < 0.05 {
        QualityLabel::Excellent
    } else if ratio < 0.10 {
        QualityLabel::Good
    } else if ratio < 0.20 {
        QualityLabel::Fair
    } else {
        QualityLabel::Poor
    }
}

/// Classify a raw R² goodness-of-fit value
pub fn classify_fit(r2: f64) -> QualityLabel {
    if r2.is_nan() {
        QualityLabel::Unknown
    } else if r2 >= 0.9 {
        QualityLabel::Excellent
    } else if r2 >= 0.75 {
        QualityLabel::Good
    } else if r2 >= 0.5 {
        QualityLabel::Fair
    } else {
        QualityLabel::Poor
    }
}

/// Arithmetic mean of all close prices; 0.0 for an empty series (which
/// classifies every error as `Unknown`)
pub fn average_close(series: &[Ohlcv]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().map(|r| r.close).sum::<f64>() / series.len() as f64
}
