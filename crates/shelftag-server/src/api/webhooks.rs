//! The inbound change-notification endpoint.
//!
//! Verification runs over the exact raw request bytes, before any JSON
//! parsing. A bad or missing signature is fatal for that one delivery —
//! 401, log, nothing enqueued. A valid delivery is acknowledged with 200 as
//! soon as its variant ids are on the pending queue; reconciliation
//! continues asynchronously.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;
use crate::signature;

const SIGNATURE_HEADER: &str = "x-shopify-hmac-sha256";

/// The slice of a `products/update` payload this service cares about.
#[derive(Debug, Deserialize)]
struct ProductUpdatePayload {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    variants: Vec<PayloadVariant>,
}

#[derive(Debug, Deserialize)]
struct PayloadVariant {
    id: i64,
}

pub(super) async fn receive_product_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(provided) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        tracing::warn!("webhook rejected: missing signature header");
        return ApiError::new(req_id.0, "unauthorized", "missing signature header")
            .into_response();
    };

    if !signature::verify(state.config.webhook_secret.as_bytes(), &body, provided) {
        tracing::warn!("webhook rejected: signature verification failed");
        return ApiError::new(req_id.0, "unauthorized", "signature verification failed")
            .into_response();
    }

    // Signature is good; only now is the body parsed. An unparseable body
    // is acknowledged anyway — redelivery would not fix it.
    let payload: ProductUpdatePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "webhook payload did not parse — acknowledging without processing");
            return StatusCode::OK.into_response();
        }
    };

    let count = payload.variants.len();
    for variant in payload.variants {
        state.queue.enqueue(variant.id.to_string());
    }

    tracing::info!(
        product_id = ?payload.id,
        variants = count,
        "webhook accepted — variants enqueued"
    );

    StatusCode::OK.into_response()
}
