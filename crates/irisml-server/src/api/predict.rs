use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;

use irisml_core::{PredictionRequest, PredictionResponse};

use crate::api::ApiError;
use crate::app_state::AppState;

/// `POST /predict`
///
/// Invalid bodies, including non-JSON content types, are rejected before any
/// metric is touched. Once the body validates, the request is counted and
/// timed; the timer guard records the latency on both the success and the
/// inference-failure path.
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let content_type = headers.get(header::CONTENT_TYPE).map(|v| String::from_utf8_lossy(v.as_bytes()));
    let req = PredictionRequest::from_http_body(content_type.as_deref(), &body).map_err(|e| {
        tracing::debug!(error = %e, content_type = ?content_type, "predict request rejected");
        ApiError::from(e)
    })?;

    let metrics = state.metrics();
    metrics.increment_request_count();
    let _timer = metrics.start_latency_timer();

    match state.model().classify(&req.features()) {
        Ok(prediction) => {
            tracing::debug!(prediction, features = ?req.features(), "prediction served");
            Ok(Json(PredictionResponse { prediction }))
        }
        Err(e) => {
            tracing::warn!(error = %e, features = ?req.features(), "inference failed");
            Err(ApiError::from(e))
        }
    }
}
