use crate::error::relay::RelayError;
use crate::server::state::ServerState;

use common::ErrorLocation;
use models::{AnalysisRequest, AnalysisResponse};

use std::panic::Location;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use log::{error, info, warn};
use uuid::Uuid;

/// `POST /analyze`
///
/// One request, one upstream call. Upstream failures become `500 {"error": "server error"}`;
/// malformed model output never does, it is repaired by the extraction fallback.
pub async fn analyze(
    State(state): State<ServerState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, RelayError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        warn!("[{}] Rejected /analyze body: {}", request_id, rejection.body_text());
        RelayError::InvalidRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    info!(
        "[{}] /analyze mode={} text_len={}",
        request_id,
        request.mode,
        request.text.len()
    );

    match state.relay.analyze(&request).await {
        Ok(extraction) => {
            info!("[{}] Responding via {} branch", request_id, extraction.branch());
            Ok(Json(extraction.into_response()))
        }
        Err(e) => {
            error!("[{}] Server error while contacting upstream: {}", request_id, e);
            if let RelayError::Upstream { source, .. } = &e {
                if source.status_code().is_some_and(|status| status.is_auth_failure()) {
                    warn!("[{}] Upstream rejected the API key; check the configured key variable", request_id);
                }
            }
            Err(e)
        }
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
