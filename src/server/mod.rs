pub mod api;

use crate::services::{CompanyDirectory, SharedBlobStore};
use crate::utils::get_public_dir;
use axum::{extract::FromRef, http::Method, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedBlobStore,
    pub directory: Arc<CompanyDirectory>,
}

impl FromRef<AppState> for SharedBlobStore {
    fn from_ref(app_state: &AppState) -> SharedBlobStore {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<CompanyDirectory> {
    fn from_ref(app_state: &AppState) -> Arc<CompanyDirectory> {
        app_state.directory.clone()
    }
}

/// Build the application router.
///
/// Any path not matching an API route falls through to the compiled
/// single-page bundle, with the entry document served for unknown paths so
/// client-side routing keeps working.
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let public_dir = get_public_dir();
    let spa = ServeDir::new(&public_dir)
        .not_found_service(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/files/{symbol}", get(api::get_series_handler))
        .route("/download/{symbol}", get(api::download_series_handler))
        .route(
            "/predictions/{symbol}/{filename}",
            get(api::prediction_asset_handler),
        )
        .route("/companies", get(api::list_companies_handler))
        .fallback_service(spa)
        .layer(cors)
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(
    store: SharedBlobStore,
    directory: Arc<CompanyDirectory>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting stockboard server");
    tracing::info!("Registering routes:");
    tracing::info!("  GET /files/{{symbol}}");
    tracing::info!("  GET /download/{{symbol}}");
    tracing::info!("  GET /predictions/{{symbol}}/{{filename}}");
    tracing::info!("  GET /companies?q=&page=&page_size=");
    tracing::info!("  GET /* (static frontend from {})", get_public_dir().display());

    let app = router(AppState { store, directory });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
