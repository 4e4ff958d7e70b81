use std::sync::Arc;

use crate::server;
use crate::services::{BlobStore, CompanyDirectory};
use crate::utils::{get_blob_db_path, get_company_list_path, resolve_port};

pub fn run(port: Option<u16>) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    rt.block_on(async {
        let port = resolve_port(port);
        println!("🚀 Starting stockboard server on port {}", port);

        let db_path = get_blob_db_path();
        println!("📦 Blob store: {}", db_path.display());

        // A store that cannot be opened is fatal; there is nothing to serve
        let store = match BlobStore::open(db_path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!("❌ Failed to open blob store: {}", e);
                std::process::exit(1);
            }
        };

        match store.count().await {
            Ok(count) => println!("   {} blobs available", count),
            Err(e) => eprintln!("⚠️  Warning: could not count blobs: {}", e),
        }

        let list_path = get_company_list_path();
        let directory = match CompanyDirectory::from_csv_path(&list_path) {
            Ok(directory) => {
                println!(
                    "🏢 {} companies loaded from {}",
                    directory.len(),
                    list_path.display()
                );
                Arc::new(directory)
            }
            Err(e) => {
                eprintln!(
                    "⚠️  Warning: failed to load company list from {}: {}",
                    list_path.display(),
                    e
                );
                eprintln!("   Server will start with an empty company directory.");
                Arc::new(CompanyDirectory::default())
            }
        };

        if let Err(e) = server::serve(store, directory, port).await {
            eprintln!("❌ Server error: {}", e);
            std::process::exit(1);
        }
    });
}
