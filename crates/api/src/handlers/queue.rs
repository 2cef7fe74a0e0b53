//! Handler for the queue-listing endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::response::QueueResponse;
use crate::state::AppState;

/// Query parameters for `/squeue`.
#[derive(Debug, Deserialize)]
pub struct QueueParams {
    /// Restrict the listing to the server user's own jobs.
    #[serde(rename = "userOnly", default)]
    pub user_only: bool,
}

/// GET /squeue -- list jobs, optionally scoped to the server's own user.
///
/// A failed squeue invocation still answers 200 with whatever rows parsed;
/// the failure travels in the nested `squeue` status object.
pub async fn list_queue(
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> Json<QueueResponse> {
    // The filter user is the identity the server resolved at startup, never
    // a request field.
    let user = params.user_only.then(|| &*state.username);
    let listing = state.slurm.queue(user).await;

    tracing::info!(
        user_only = params.user_only,
        rows = listing.rows.len(),
        returncode = listing.status.returncode,
        "squeue listing served",
    );

    Json(QueueResponse {
        data: listing.rows,
        squeue: listing.status,
    })
}
