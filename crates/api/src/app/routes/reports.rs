use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use stockroom_infra::InventorySnapshot;

use crate::app::{AppState, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/stock", get(stock_report))
        .route("/orders", get(orders_report))
}

pub async fn stock_report(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::StockReportQuery>,
) -> axum::response::Response {
    let range = match dto::parse_range(query.start_date.as_deref(), query.end_date.as_deref(), Utc::now().date_naive()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match InventorySnapshot::load(state.store.as_ref()).await {
        Ok(snapshot) => Json(dto::ReportResponse {
            data: snapshot.stock_report(range, &query.filter(), &state.ledger),
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn orders_report(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::OrderReportQuery>,
) -> axum::response::Response {
    let range = match dto::parse_range(query.start_date.as_deref(), query.end_date.as_deref(), Utc::now().date_naive()) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match InventorySnapshot::load(state.store.as_ref()).await {
        Ok(snapshot) => Json(dto::ReportResponse {
            data: snapshot.orders_report(range, &query.filter()),
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
