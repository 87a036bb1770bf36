// HTTP surface for the quota engine
//
// Routes:
//   GET  /health          liveness probe, independent of quota state
//   POST /quota/consume   admission decision for (X-Api-Key, units)

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::quota::{QuotaEngine, QuotaError};

/// Request header carrying the caller's identity
pub const API_KEY_HEADER: &str = "x-api-key";
/// Response header: policy limit per window
pub const LIMIT_HEADER: &str = "x-quota-limit";
/// Response header: units left in the current window
pub const REMAINING_HEADER: &str = "x-quota-remaining";
/// Response header: instant (ms) at which the current window ends
pub const RESET_HEADER: &str = "x-quota-reset-millis";

/// Body of a consume request
#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumeRequest {
    /// Requested units; must be strictly positive
    pub units: i64,
}

/// Body of a consume response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeResponse {
    /// Whether the debit was applied
    pub accepted: bool,
    /// Units left in the current window
    pub remaining: u64,
    /// Instant (ms) at which the current window ends
    pub reset_at_ms: u64,
}

/// Errors surfaced by request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller-caused validation failure, mapped to 400
    #[error(transparent)]
    BadRequest(#[from] QuotaError),

    /// Unexpected fault, mapped to 500 without leaking detail
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(err) => {
                info!("bad request: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
            ApiError::Internal(err) => {
                error!("unhandled error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Build the router with a shared engine.
pub fn router(engine: Arc<QuotaEngine>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/quota/consume", post(consume_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Bind and serve until the process is stopped.
pub async fn serve(engine: Arc<QuotaEngine>, port: u16) -> Result<()> {
    let app = router(engine);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("starting quota server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind quota server")?;

    axum::serve(listener, app)
        .await
        .context("quota server error")?;

    Ok(())
}

/// Liveness endpoint, independent of quota state
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Admission endpoint: one engine decision per request
async fn consume_handler(
    State(engine): State<Arc<QuotaEngine>>,
    headers: HeaderMap,
    Json(req): Json<ConsumeRequest>,
) -> Result<Response, ApiError> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(QuotaError::EmptyKey)?;

    if req.units <= 0 {
        return Err(QuotaError::NonPositiveUnits.into());
    }

    info!(api_key, units = req.units, "consume");

    let decision = engine.consume(api_key, req.units as u64)?;

    let status = if decision.is_accepted() {
        StatusCode::OK
    } else {
        StatusCode::TOO_MANY_REQUESTS
    };
    let body = ConsumeResponse {
        accepted: decision.is_accepted(),
        remaining: decision.remaining(),
        reset_at_ms: decision.reset_at_ms(),
    };

    let mut response = (status, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(LIMIT_HEADER, engine.policy().limit_units().into());
    headers.insert(REMAINING_HEADER, decision.remaining().into());
    headers.insert(RESET_HEADER, decision.reset_at_ms().into());

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::QuotaDecision;

    #[test]
    fn test_consume_response_wire_names() {
        let body = ConsumeResponse {
            accepted: false,
            remaining: 3,
            reset_at_ms: 1_234,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({ "accepted": false, "remaining": 3, "resetAtMs": 1234 })
        );
    }

    #[tokio::test]
    async fn test_internal_error_response_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // The fault detail must never reach the caller.
        assert_eq!(body, json!({ "error": "internal error" }));
        assert!(!String::from_utf8_lossy(&bytes).contains("boom"));
    }

    #[tokio::test]
    async fn test_validation_error_response_carries_message() {
        let err = ApiError::BadRequest(QuotaError::NonPositiveUnits);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "units must be positive" }));
    }

    #[test]
    fn test_decision_status_mapping() {
        let accepted = QuotaDecision::Accepted {
            remaining: 1,
            reset_at_ms: 0,
        };
        let rejected = QuotaDecision::Rejected {
            remaining: 0,
            reset_at_ms: 0,
        };
        assert!(accepted.is_accepted());
        assert!(!rejected.is_accepted());
    }
}
