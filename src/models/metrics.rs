//! Model accuracy metrics
//!
//! Metrics text blobs are free-form: the first three free-standing numeric
//! tokens are taken as RMSE, MAE and R², in that order. Field labels are not
//! honored, so a digit glued to a letter (the `2` in `R2:`) must not count as
//! a token or it would shadow the real R² value.

use serde::{Deserialize, Serialize};

/// RMSE / MAE / R² extracted from a metrics text blob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTriple {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl MetricTriple {
    /// Extract the first three free-standing numeric tokens from `text`.
    ///
    /// Returns `None` when fewer than three tokens are present.
    pub fn parse(text: &str) -> Option<Self> {
        let tokens = numeric_tokens(text, 3);
        match tokens[..] {
            [rmse, mae, r2] => Some(Self { rmse, mae, r2 }),
            _ => None,
        }
    }
}

/// Scan `text` for up to `limit` numeric tokens (`-?digits[.digits]`).
///
/// A digit run whose preceding character is alphanumeric belongs to an
/// identifier and is skipped entirely.
fn numeric_tokens(text: &str, limit: usize) -> Vec<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() && out.len() < limit {
        let c = chars[i];
        let starts_token = c.is_ascii_digit()
            || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()));
        if !starts_token {
            i += 1;
            continue;
        }

        if i > 0 && chars[i - 1].is_ascii_alphanumeric() {
            // identifier tail, e.g. the 2 in "R2"
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            continue;
        }

        let start = i;
        if chars[i] == '-' {
            i += 1;
        }
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i < chars.len()
            && chars[i] == '.'
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }

        let token: String = chars[start..i].iter().collect();
        if let Ok(value) = token.parse::<f64>() {
            out.push(value);
        }
    }

    out
}

/// Prediction model variants with precomputed plot and metrics assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionModel {
    Ann,
    Lstm,
    RandomForest,
    Svr,
}

impl PredictionModel {
    pub const ALL: [PredictionModel; 4] = [
        PredictionModel::Ann,
        PredictionModel::Lstm,
        PredictionModel::RandomForest,
        PredictionModel::Svr,
    ];

    /// Uppercase token used in asset filenames
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionModel::Ann => "ANN",
            PredictionModel::Lstm => "LSTM",
            PredictionModel::RandomForest => "RANDOMFOREST",
            PredictionModel::Svr => "SVR",
        }
    }

    /// Human-readable title shown next to the plot
    pub fn title(self) -> &'static str {
        match self {
            PredictionModel::Ann => "Artificial Neural Network Prediction",
            PredictionModel::Lstm => "Long Short Term Memory Prediction",
            PredictionModel::RandomForest => "Random Forest Prediction",
            PredictionModel::Svr => "Support Vector Regression Prediction",
        }
    }

    /// Filename of the prediction plot image for this model
    pub fn plot_filename(self) -> String {
        format!("{}_prediction_plot.png", self.as_str())
    }

    /// Filename of the metrics text file for this model
    pub fn metrics_filename(self) -> String {
        format!("{}_metrics.txt", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_metrics_text() {
        let triple = MetricTriple::parse("RMSE: 2.3, MAE: 1.1, R2: 0.87").unwrap();
        assert_eq!(triple.rmse, 2.3);
        assert_eq!(triple.mae, 1.1);
        assert_eq!(triple.r2, 0.87);
    }

    #[test]
    fn test_parse_ignores_digits_inside_labels() {
        // "R2" must not contribute a token of its own
        let triple = MetricTriple::parse("R2: 0.9 RMSE 1.5 MAE 0.8").unwrap();
        assert_eq!(triple.rmse, 0.9);
        assert_eq!(triple.mae, 1.5);
        assert_eq!(triple.r2, 0.8);
    }

    #[test]
    fn test_parse_negative_r2() {
        let triple = MetricTriple::parse("rmse=4.0 mae=2.5 r2=-0.12").unwrap();
        assert_eq!(triple.r2, -0.12);
    }

    #[test]
    fn test_parse_multiline_metrics_text() {
        let text = "RMSE: 12.5\nMAE: 9.75\nR2 Score: 0.9213\n";
        let triple = MetricTriple::parse(text).unwrap();
        assert_eq!(triple.rmse, 12.5);
        assert_eq!(triple.mae, 9.75);
        assert_eq!(triple.r2, 0.9213);
    }

    #[test]
    fn test_parse_requires_three_numbers() {
        assert!(MetricTriple::parse("RMSE: 2.3, MAE: 1.1").is_none());
        assert!(MetricTriple::parse("no numbers here").is_none());
        assert!(MetricTriple::parse("").is_none());
    }

    #[test]
    fn test_model_asset_filenames() {
        assert_eq!(
            PredictionModel::Lstm.plot_filename(),
            "LSTM_prediction_plot.png"
        );
        assert_eq!(
            PredictionModel::RandomForest.metrics_filename(),
            "RANDOMFOREST_metrics.txt"
        );
    }
}
