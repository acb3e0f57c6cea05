//! Health probe.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

use granite_revocation::subject::SUPPORTED_FORMATS;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service identity.
    pub service: &'static str,
    /// Subject identifier formats the revocation endpoint accepts.
    pub sub_id_formats: &'static [&'static str],
    /// Current server time, RFC 3339.
    pub timestamp: String,
}

/// GET `/health`
///
/// Unauthenticated liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "granite-bank",
        sub_id_formats: SUPPORTED_FORMATS,
        timestamp: Utc::now().to_rfc3339(),
    })
}
