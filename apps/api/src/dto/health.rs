use serde::Serialize;
use ts_rs::TS;

/// Storage dependency status.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-dependency-status.ts")]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub storage: &'static str,
    pub postgres: HealthDependencyStatus,
}
