//! Handler for the job hold/release endpoint.

use axum::extract::{Path, State};
use axum::Json;
use slurm_bridge_core::slurm::control::ControlAction;
use slurm_bridge_core::slurm::CommandStatus;

use crate::error::AppResult;
use crate::extract::{JobPayload, JsonOrForm};
use crate::state::AppState;

/// PATCH /scontrol/{action} -- hold or release one job.
///
/// The action comes from the path and must be in the hold/release
/// allow-list; an unknown action is an invalid-command rejection, distinct
/// from an invalid job ID. Both are detected before any process is spawned.
pub async fn control_job(
    State(state): State<AppState>,
    Path(action): Path<String>,
    JsonOrForm(payload): JsonOrForm<JobPayload>,
) -> AppResult<Json<CommandStatus>> {
    let job = payload.job_id()?;
    let action: ControlAction = action.parse()?;

    let status = state.slurm.control(action, &job).await;

    tracing::info!(
        job_id = %job,
        action = %action,
        returncode = status.returncode,
        "scontrol completed",
    );

    Ok(Json(status))
}
