use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tecnologuia_shared::{HealthCheck, HealthResponse, HealthStatus};

use crate::AppState;

/// Health check that tries to check out a pooled database connection.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let pool = state.db.clone();
    let checkout = tokio::task::spawn_blocking(move || pool.get().map(|_| ())).await;

    let database = match checkout {
        Ok(Ok(())) => HealthCheck {
            name: "database".into(),
            status: HealthStatus::Healthy,
            message: None,
        },
        Ok(Err(e)) => {
            tracing::error!(error = %e, "health check could not reach the database");
            unreachable_database()
        }
        Err(e) => {
            tracing::error!(error = %e, "health check task failed");
            unreachable_database()
        }
    };

    let response = HealthResponse::healthy("tecnologuia-api", env!("CARGO_PKG_VERSION"))
        .with_checks(vec![database]);

    let status = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    (status, Json(response)).into_response()
}

// Driver errors carry host, port and auth details, so they stay in the logs.
fn unreachable_database() -> HealthCheck {
    HealthCheck {
        name: "database".into(),
        status: HealthStatus::Unhealthy,
        message: Some("database unreachable".into()),
    }
}

/// Returns Prometheus metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}
