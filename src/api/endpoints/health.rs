//! Service liveness endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /`: welcome text.
pub async fn index() -> String {
    format!(
        "Welcome to the {} medical records service v{}",
        crate::config::APP_NAME,
        crate::config::APP_VERSION
    )
}

/// `GET /health`: connection check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
    })
}
