use axum::{Router, routing::get};

pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reports;
pub mod stock;
pub mod system;
pub mod units;

/// Router for all authenticated endpoints (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/units", get(units::list_units))
        .route("/dashboard", get(dashboard::dashboard))
        .nest("/products", products::router())
        .nest("/stock", stock::router())
        .nest("/orders", orders::router())
        .nest("/reports", reports::router())
}
