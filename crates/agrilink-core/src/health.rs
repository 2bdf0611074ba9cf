use axum::Json;
use serde::Serialize;

/// Body returned by the health endpoints.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
}

const OK: HealthStatus = HealthStatus { status: "ok" };

/// `GET /healthz`: the process is up.
pub async fn healthz() -> Json<HealthStatus> {
    Json(OK)
}

/// `GET /readyz`: the service can take traffic. Storage is in-process, so this
/// is ready as soon as the router is serving.
pub async fn readyz() -> Json<HealthStatus> {
    Json(OK)
}
