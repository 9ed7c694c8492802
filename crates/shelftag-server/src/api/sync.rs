//! The reconciliation trigger endpoint.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SyncRequest {
    /// Specific variants to reconcile. Absent or empty means "enumerate
    /// the whole catalog".
    #[serde(default)]
    variant_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct SyncData {
    /// How many variant ids were accepted for background processing.
    enqueued: usize,
    /// `false` when a full-catalog enumeration was truncated by retry
    /// exhaustion: the enqueued set covers only part of the catalog.
    complete: bool,
}

/// `POST /api/v1/sync` — accepts ids (or `{}`, meaning the whole catalog),
/// enqueues them, and returns immediately. Processing happens in the
/// background; the response contract is "accepted for processing", not
/// "done".
pub(super) async fn trigger_sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SyncRequest>,
) -> impl IntoResponse {
    let (enqueued, complete) = match request.variant_ids.filter(|ids| !ids.is_empty()) {
        Some(ids) => {
            let count = state.queue.enqueue_all(ids);
            tracing::info!(enqueued = count, "targeted sync enqueued");
            (count, true)
        }
        None => {
            let enumeration = state
                .client
                .enumerate_variant_ids(state.config.page_size, state.config.inter_page_delay_ms)
                .await;
            if !enumeration.complete {
                tracing::warn!(
                    collected = enumeration.variant_ids.len(),
                    "full sync enumeration was truncated — enqueueing partial catalog"
                );
            }
            let complete = enumeration.complete;
            let count = state.queue.enqueue_all(enumeration.variant_ids);
            tracing::info!(enqueued = count, complete, "full sync enqueued");
            (count, complete)
        }
    };

    Json(ApiResponse {
        data: SyncData { enqueued, complete },
        meta: ResponseMeta::new(req_id.0),
    })
}
