use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_inventory::NewProductionOrder;

use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_production_orders).post(create_production_order))
}

pub async fn list_production_orders(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match state.store.list_production_orders().await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_production_order(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewProductionOrder>,
) -> axum::response::Response {
    match state.store.create_production_order(body).await {
        Ok(order) => {
            tracing::info!(
                employee = session.unique_employee_id(),
                order_id = %order.id,
                product_id = %order.product_id,
                quantity_used = order.quantity_used,
                "production order created"
            );
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
