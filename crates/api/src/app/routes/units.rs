use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::{AppState, errors};

pub async fn list_units(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match state.store.list_units().await {
        Ok(units) => Json(units).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
