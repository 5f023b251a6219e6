use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, ChartError},
    models::{ChartKind, ChartSeries, ColumnKind, DatasetSummary, Record},
    services::{build, profile, summarize},
    AppState,
};

use super::extract::AppJson;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/datasets/summary", post(dataset_summary))
        .route("/datasets/chart-data", post(chart_data))
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct ChartDataRequest {
    pub records: Vec<Record>,
    pub column: String,
    pub chart_type: ChartKind,
}

#[derive(Debug, Serialize)]
pub struct ChartDataResponse {
    pub chart_data: ChartSeries,
    pub column_type: ColumnKind,
}

#[axum::debug_handler]
pub async fn dataset_summary(
    AppJson(request): AppJson<SummaryRequest>,
) -> Result<Json<DatasetSummary>, AppError> {
    let start = std::time::Instant::now();
    let summary = summarize(&request.records);
    tracing::info!(
        "Summarized {} rows, {} columns in {:?}",
        summary.total_rows,
        summary.total_columns,
        start.elapsed()
    );
    Ok(Json(summary))
}

#[axum::debug_handler]
pub async fn chart_data(
    AppJson(request): AppJson<ChartDataRequest>,
) -> Result<Json<ChartDataResponse>, AppError> {
    let start = std::time::Instant::now();
    tracing::info!(
        "Building {:?} chart for column {} over {} rows",
        request.chart_type,
        request.column,
        request.records.len()
    );

    let profiles = profile(&request.records);
    let chart_data = build(&request.records, &profiles, &request.column, request.chart_type)?;
    let column_type = profiles
        .get(&request.column)
        .map(|column| column.kind)
        .ok_or_else(|| ChartError::InvalidColumn(request.column.clone()))?;

    tracing::info!("Chart data built in {:?}", start.elapsed());

    Ok(Json(ChartDataResponse {
        chart_data,
        column_type,
    }))
}
