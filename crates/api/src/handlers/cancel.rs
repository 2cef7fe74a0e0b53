//! Handler for the job-cancel endpoint.

use axum::extract::State;
use axum::Json;
use slurm_bridge_core::slurm::CommandStatus;

use crate::error::AppResult;
use crate::extract::{JobPayload, JsonOrForm};
use crate::state::AppState;

/// DELETE /scancel -- cancel one job.
///
/// The body supplies `jobID` (JSON or form). Absent or non-numeric IDs are
/// rejected with 400 before any process is spawned.
pub async fn cancel_job(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<JobPayload>,
) -> AppResult<Json<CommandStatus>> {
    let job = payload.job_id()?;

    let status = state.slurm.cancel(&job).await;

    tracing::info!(
        job_id = %job,
        returncode = status.returncode,
        "scancel completed",
    );

    Ok(Json(status))
}
