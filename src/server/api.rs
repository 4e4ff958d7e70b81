use crate::constants::{prediction_blob_name, series_blob_name, DEFAULT_PAGE_SIZE};
use crate::error::AppError;
use crate::server::AppState;
use crate::services::{normalize, parse_series, SearchPage};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

/// GET /files/{symbol} - parsed and normalized series as a JSON array
///
/// The symbol is uppercased before lookup; stored blob names are
/// case-sensitive.
pub async fn get_series_handler(
    State(app_state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let symbol = symbol.trim().to_uppercase();
    let blob_name = series_blob_name(&symbol);

    let bytes = match app_state.store.read(&blob_name).await {
        Ok(bytes) => bytes,
        Err(AppError::NotFound(_)) => {
            warn!(symbol = %symbol, "series blob not found");
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "CSV file not found" })),
            )
                .into_response();
        }
        Err(e) => {
            error!(symbol = %symbol, "stream error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error reading CSV file" })),
            )
                .into_response();
        }
    };

    match parse_series(&bytes) {
        Ok(records) => {
            let series = normalize(records);
            info!(symbol = %symbol, records = series.len(), "Returning series");
            Json(series).into_response()
        }
        Err(e) => {
            error!(symbol = %symbol, "failed to parse series CSV: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error reading CSV file" })),
            )
                .into_response()
        }
    }
}

/// GET /download/{symbol} - raw series CSV as an attachment
pub async fn download_series_handler(
    State(app_state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let symbol = symbol.trim().to_uppercase();
    let blob_name = series_blob_name(&symbol);

    let meta = match app_state.store.stat(&blob_name).await {
        Ok(Some(meta)) => meta,
        Ok(None) => {
            warn!(symbol = %symbol, "series blob not found for download");
            return (StatusCode::NOT_FOUND, "CSV file not found").into_response();
        }
        Err(e) => {
            error!(symbol = %symbol, "metadata lookup failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    let bytes = match app_state.store.read(&blob_name).await {
        Ok(bytes) => bytes,
        Err(AppError::NotFound(_)) => {
            return (StatusCode::NOT_FOUND, "CSV file not found").into_response();
        }
        Err(e) => {
            error!(symbol = %symbol, "stream error during download: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    let content_type = if meta.content_type.is_empty() {
        "text/csv".to_string()
    } else {
        meta.content_type
    };

    info!(symbol = %symbol, bytes = meta.length, "Serving series download");

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_stock.csv\"", symbol),
        )
        .header(CONTENT_LENGTH, meta.length)
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// GET /predictions/{symbol}/{filename} - prediction plot or metrics blob
///
/// The name is looked up verbatim; clients uppercase the symbol themselves.
pub async fn prediction_asset_handler(
    State(app_state): State<AppState>,
    Path((symbol, filename)): Path<(String, String)>,
) -> Response {
    let blob_name = prediction_blob_name(&symbol, &filename);

    let meta = match app_state.store.stat(&blob_name).await {
        Ok(Some(meta)) => meta,
        Ok(None) => {
            warn!(symbol = %symbol, filename = %filename, "prediction asset not found");
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
        Err(e) => {
            error!(symbol = %symbol, "metadata lookup failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    let bytes = match app_state.store.read(&blob_name).await {
        Ok(bytes) => bytes,
        Err(AppError::NotFound(_)) => {
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
        Err(e) => {
            error!(symbol = %symbol, "stream error serving prediction asset: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    let content_type = if meta.content_type.is_empty() {
        "image/png".to_string()
    } else {
        meta.content_type
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, meta.length)
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Query parameters for /companies
#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    /// Case-insensitive substring matched against symbol, name, description
    #[serde(default)]
    pub q: String,

    /// 1-based page number
    pub page: Option<usize>,

    pub page_size: Option<usize>,
}

/// GET /companies - search and paginate the static company directory
pub async fn list_companies_handler(
    State(app_state): State<AppState>,
    Query(params): Query<CompanyQuery>,
) -> Json<SearchPage> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    let result = app_state.directory.search_page(&params.q, page, page_size);
    info!(
        query = %params.q,
        page,
        matches = result.total,
        "Returning company directory page"
    );
    Json(result)
}
