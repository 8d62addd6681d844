// src/api/http/handlers.rs

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::types::{ConvertResponse, StatusResponse};
use crate::convert::ConversionRequest;
use crate::state::AppState;

/// GET / and GET /index.html
pub async fn index_handler(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let page = state
        .page
        .load()
        .await
        .into_api_error("Failed to load page")?;
    Ok(Html(page.into_owned()))
}

/// POST /convert
///
/// The body is decoded by hand so that a bad payload becomes the JSON error shape
/// instead of axum's plain-text rejection, and so no Content-Type is required.
pub async fn convert_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ConvertResponse>> {
    let body = body.map_err(|rejection| {
        ApiError::custom(
            rejection.status(),
            format!("Server error: {}", rejection.body_text()),
        )
    })?;

    let request: ConversionRequest =
        serde_json::from_slice(&body).map_err(ApiError::malformed_body)?;
    debug!("Received convert request: {:?}", request);

    let result = state.dispatcher.convert(request).await;
    Ok(Json(ConvertResponse::from(result)))
}

/// OPTIONS on a known route. Real CORS pre-flights are answered by the CORS layer
/// before they get here; this covers bare OPTIONS probes.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// GET /api/status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        oracle: state.dispatcher.oracle_name().to_string(),
        model: state.model.clone(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Anything unrouted: OPTIONS still answers 200, everything else is 404
pub async fn fallback_handler(method: Method) -> StatusCode {
    if method == Method::OPTIONS {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}
