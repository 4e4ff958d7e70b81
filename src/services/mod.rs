pub mod blob_store;
pub mod chart;
pub mod classify;
pub mod csv_rows;
pub mod directory;
pub mod ingest;
pub mod normalize;

pub use blob_store::{BlobMeta, BlobStore, SharedBlobStore};
pub use chart::{ChartView, CrosshairReadout, RangePreset, SymbolSelection};
pub use classify::{average_close, classify_error, classify_fit, QualityLabel};
pub use csv_rows::parse_series;
pub use directory::{CompanyDirectory, PageLink, SearchPage};
pub use normalize::normalize;
