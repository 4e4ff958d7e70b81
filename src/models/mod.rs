mod company;
mod metrics;
mod ohlcv;

pub use company::Company;
pub use metrics::{MetricTriple, PredictionModel};
pub use ohlcv::Ohlcv;

/// Time series data for a single symbol
pub type Series = Vec<Ohlcv>;
