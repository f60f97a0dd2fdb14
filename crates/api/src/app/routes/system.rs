use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": session.employee_id(),
        "unique_employee_id": session.unique_employee_id(),
    }))
}
