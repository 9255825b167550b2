//! Health check handlers
//! `/health` and `/ready` probes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;

use crate::{db, middleware::AppState};

/// Liveness probe response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Readiness probe response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// Single readiness check entry
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

static APP_START: OnceLock<Instant> = OnceLock::new();

/// Record the process start time; called once from main
pub fn set_start_time() {
    let _ = APP_START.set(Instant::now());
}

/// Seconds since process start
pub fn get_uptime() -> u64 {
    APP_START.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// Liveness probe (`GET /health`); does not touch the database
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime(),
    })
}

/// Readiness probe (`GET /ready`); checks database connectivity
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    db::record_pool_metrics(&state.db);

    let (status, message, ready) = match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => ("ok".to_string(), None, true),
        db::HealthStatus::Unhealthy(msg) => ("failed".to_string(), Some(msg), false),
    };

    Json(ReadinessResponse {
        ready,
        checks: vec![HealthCheck {
            name: "database".to_string(),
            status,
            message,
        }],
    })
}
