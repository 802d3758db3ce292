use axum::Json;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "HAMASA AI Backend (OpenRouter) is running successfully!";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
    })
}
