//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub ledger: &'static str,
    pub manager_configured: bool,
    pub package_configured: bool,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let chain = state.reader.config();
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        ledger: state.backend.name(),
        manager_configured: chain.manager_id.is_some(),
        package_configured: chain.package_id.is_some(),
    };

    HttpResponse::Ok().json(response)
}
