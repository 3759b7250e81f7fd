use crate::sorting::{sort_groups, SortKey};
use crate::{error::AppError, AppState};
use analytics::AnalyticsData;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use core_types::{BotRef, TimeRange, Trade};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/analytics`: the caller supplies all the data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub bots: Vec<BotRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<TimeRange>,
    #[serde(default)]
    pub sort: SortKey,
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/analytics?range=1M&sort=pnl
/// Computes analytics over the configured trade snapshot.
pub async fn get_snapshot_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsData>, AppError> {
    let snapshot = state.store.load_snapshot().await?;
    let range = query.range.unwrap_or(state.default_time_range);

    let mut data = state.engine.compute(&snapshot.trades, range, &snapshot.bots)?;
    sort_groups(&mut data, query.sort);
    Ok(Json(data))
}

/// # POST /api/analytics?sort=pnl
/// Computes analytics over the trades and bots in the request body.
pub async fn compute_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
    payload: Result<Json<AnalyticsRequest>, JsonRejection>,
) -> Result<Json<AnalyticsData>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let range = request
        .time_range
        .or(query.range)
        .unwrap_or(state.default_time_range);

    let mut data = state.engine.compute(&request.trades, range, &request.bots)?;
    sort_groups(&mut data, query.sort);
    Ok(Json(data))
}
