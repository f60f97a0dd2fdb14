use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_inventory::NewStockEntry;

use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_stock_entries).post(add_stock))
}

pub async fn list_stock_entries(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match state.store.list_stock_entries().await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn add_stock(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewStockEntry>,
) -> axum::response::Response {
    match state.store.add_stock(body).await {
        Ok(entry) => {
            tracing::info!(
                employee = session.unique_employee_id(),
                product_id = %entry.product_id,
                opening_quantity = entry.opening_quantity,
                closing_balance = entry.closing_balance,
                "stock added"
            );
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
