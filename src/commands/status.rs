use std::collections::BTreeSet;

use crate::constants::{BLOB_NAME_SEPARATOR, SERIES_FILENAME};
use crate::models::PredictionModel;
use crate::services::BlobStore;
use crate::utils::get_blob_db_path;

/// Print a summary of the blob store: totals, symbols with series data,
/// and prediction asset coverage per model.
pub fn run() {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    rt.block_on(async {
        let db_path = get_blob_db_path();
        println!("📦 Blob store: {}", db_path.display());

        let store = match BlobStore::open(db_path).await {
            Ok(store) => store,
            Err(e) => {
                eprintln!("❌ Failed to open blob store: {}", e);
                std::process::exit(1);
            }
        };

        let names = match store.list_names().await {
            Ok(names) => names,
            Err(e) => {
                eprintln!("❌ Failed to list blobs: {}", e);
                std::process::exit(1);
            }
        };

        let symbols: BTreeSet<&str> = names
            .iter()
            .filter_map(|n| n.split(BLOB_NAME_SEPARATOR).next())
            .collect();
        let series_count = names
            .iter()
            .filter(|n| {
                n.split(BLOB_NAME_SEPARATOR).nth(1) == Some(SERIES_FILENAME)
            })
            .count();

        println!("   Total blobs:        {}", names.len());
        println!("   Distinct symbols:   {}", symbols.len());
        println!("   Series CSVs:        {}", series_count);
        println!();
        println!("🔮 Prediction asset coverage:");
        for model in PredictionModel::ALL {
            let plot_suffix = model.plot_filename();
            let metrics_suffix = model.metrics_filename();
            let plots = names.iter().filter(|n| n.ends_with(&plot_suffix)).count();
            let metrics = names.iter().filter(|n| n.ends_with(&metrics_suffix)).count();
            println!(
                "   {:<13} {} plots, {} metrics ({})",
                model.as_str(),
                plots,
                metrics,
                model.title()
            );
        }

        store.close().await;
    });
}
