use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stockroom_inventory::{NewProduct, ProductUpdate};

use crate::app::{AppState, dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
}

pub async fn list_products(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match state.store.list_products().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewProduct>,
) -> axum::response::Response {
    match state.store.create_product(body).await {
        Ok(product) => {
            tracing::info!(
                employee = session.unique_employee_id(),
                product_id = %product.id,
                name = %product.name,
                "product created"
            );
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<ProductUpdate>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.store.update_product(id, body).await {
        Ok(product) => {
            tracing::info!(employee = session.unique_employee_id(), product_id = %id, "product updated");
            Json(product).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.store.delete_product(id).await {
        Ok(()) => {
            tracing::info!(employee = session.unique_employee_id(), product_id = %id, "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
