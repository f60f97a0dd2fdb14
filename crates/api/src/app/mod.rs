//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: query/response DTOs and parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockroom_infra::InventoryStore;
use stockroom_inventory::LedgerSettings;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler state.
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub ledger: LedgerSettings,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(jwt_secret: String, store: Arc<dyn InventoryStore>, ledger: LedgerSettings) -> Router {
    let jwt = Arc::new(stockroom_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let state = Arc::new(AppState { store, ledger });

    // Protected routes: require a valid session token.
    let protected = routes::router()
        .layer(Extension(state))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", protected)
        .layer(ServiceBuilder::new())
}
