use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppError,
    models::DatasetSummary,
    services::{
        excel::{read_sheet, SheetFormat, SheetRecords},
        summarize,
    },
    AppState,
};

use super::extract::AppQuery;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sheets/records", post(sheet_records))
}

#[derive(Debug, Default, Deserialize)]
pub struct SheetQuery {
    #[serde(default)]
    pub format: SheetFormat,
}

#[derive(Debug, Serialize)]
pub struct SheetResponse {
    #[serde(flatten)]
    pub sheet: SheetRecords,
    pub summary: DatasetSummary,
}

#[axum::debug_handler]
pub async fn sheet_records(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<SheetQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SheetResponse>, AppError> {
    let start = std::time::Instant::now();
    let limit = state.config.max_file_size;
    let body = body?;
    tracing::info!(
        "Reading {:?} upload, size: {}KB",
        query.format,
        body.len() / 1024
    );

    if body.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }
    if body.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "upload of {} bytes exceeds the {} byte limit",
            body.len(),
            limit
        )));
    }

    let format = query.format;
    let response = tokio::task::spawn_blocking(move || -> Result<SheetResponse, AppError> {
        let sheet = read_sheet(format, body)?;
        let summary = summarize(&sheet.records);
        Ok(SheetResponse { sheet, summary })
    })
    .await
    .map_err(|e| AppError::Internal(format!("Sheet reader task failed: {}", e)))??;

    tracing::info!(
        "Sheet {} read: {} rows, {} columns in {:?}",
        response.sheet.sheet_name,
        response.summary.total_rows,
        response.summary.total_columns,
        start.elapsed()
    );

    Ok(Json(response))
}
