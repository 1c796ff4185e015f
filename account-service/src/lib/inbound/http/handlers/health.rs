use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub database: String,
}

/// Always answers 200; storage reachability is reported in the body.
pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthResponseData> {
    let database = match state.user_service.check_storage().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            "disconnected"
        }
    };

    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "ok".to_string(),
            database: database.to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResponseData {
    pub message: String,
}

pub async fn index() -> ApiSuccess<IndexResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        IndexResponseData {
            message: "Account service is running".to_string(),
        },
    )
}
