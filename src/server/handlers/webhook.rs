use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::delivery::{
    DELIVERY_HEADER, DeliveryHeaders, DeliveryRecord, EVENT_HEADER, SIGNATURE_HEADER,
};
use crate::server::AppState;
use crate::server::error::WebhookError;
use crate::server::responses::{AckResponse, HintResponse};

/// Answer browser visits instead of returning 405; processes nothing.
pub async fn webhook_hint() -> Json<HintResponse> {
    Json(HintResponse {
        ok: true,
        hint: "This endpoint expects POST from GitHub/smee.",
    })
}

/// Authenticate, parse and record one delivery.
///
/// The signature is checked against the untouched body bytes before any
/// parsing. Persistence and dispatch are handed to the background worker,
/// so the acknowledgment never waits on disk or handler work.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AckResponse>, WebhookError> {
    let headers = delivery_headers(&headers);

    if !state.verifier.verify(&body, headers.signature.as_deref()) {
        warn!(
            delivery_id = headers.delivery.as_deref().unwrap_or("-"),
            signature_present = headers.signature.is_some(),
            "Rejected delivery with invalid signature"
        );
        return Err(WebhookError::InvalidSignature);
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            delivery_id = headers.delivery.as_deref().unwrap_or("-"),
            error = %e,
            "Rejected delivery with malformed JSON"
        );
        WebhookError::InvalidJson
    })?;

    let record = Arc::new(DeliveryRecord::new(headers, payload));
    state.deliveries.push_front(record.clone()).await;
    state.worker.submit(record.clone());

    info!(
        delivery_id = record.delivery_id.as_deref().unwrap_or("-"),
        event = record.event_name(),
        "Accepted delivery"
    );

    Ok(Json(AckResponse::new(
        record.delivery_id.clone(),
        record.event.clone(),
    )))
}

/// Pull the routing and authentication headers; non-UTF-8 values count as absent.
fn delivery_headers(headers: &HeaderMap) -> DeliveryHeaders {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    DeliveryHeaders {
        event: get(EVENT_HEADER),
        signature: get(SIGNATURE_HEADER),
        delivery: get(DELIVERY_HEADER),
    }
}
