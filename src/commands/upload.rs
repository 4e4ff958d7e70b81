use std::path::PathBuf;
use std::sync::Arc;

use crate::services::ingest::{blob_name_for, collect_files, content_type_for};
use crate::services::BlobStore;
use crate::utils::get_blob_db_path;

/// Walk `source` and upload every file into the blob store, keyed by its
/// path relative to `source`. Re-running overwrites existing blobs.
pub fn run(source: PathBuf) {
    println!("🚀 Stockboard folder upload: START");
    println!("📁 Source directory: {}", source.display());

    if !source.is_dir() {
        eprintln!("❌ Not a directory: {}", source.display());
        std::process::exit(1);
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    rt.block_on(async {
        let db_path = get_blob_db_path();
        println!("📦 Blob store: {}", db_path.display());

        let store = match BlobStore::open(db_path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!("❌ Failed to open blob store: {}", e);
                std::process::exit(1);
            }
        };

        let files = match collect_files(&source) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("❌ Failed to walk {}: {}", source.display(), e);
                std::process::exit(1);
            }
        };
        println!("📊 Found {} files", files.len());

        let mut uploaded = 0;
        let mut failed = 0;

        for file in &files {
            let Some(name) = blob_name_for(&source, file) else {
                continue;
            };
            let content_type = content_type_for(file);

            let result = match tokio::fs::read(file).await {
                Ok(bytes) => store.put(&name, content_type, &bytes).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(()) => {
                    println!("✅ Uploaded: {}", name);
                    uploaded += 1;
                }
                Err(e) => {
                    eprintln!("❌ Error uploading {}: {}", name, e);
                    failed += 1;
                }
            }
        }

        store.close().await;

        println!();
        println!("🎉 Upload complete: {} uploaded, {} failed", uploaded, failed);
        if failed > 0 {
            std::process::exit(1);
        }
    });
}
