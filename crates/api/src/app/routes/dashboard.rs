use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use stockroom_infra::InventorySnapshot;

use crate::app::{AppState, errors};

/// Rollups for the dashboard screen, computed from a fresh snapshot.
pub async fn dashboard(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match InventorySnapshot::load(state.store.as_ref()).await {
        Ok(snapshot) => Json(snapshot.dashboard(&state.ledger)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
