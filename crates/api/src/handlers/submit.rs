//! Handler for the batch-submission endpoint.

use std::path::Path;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use slurm_bridge_core::error::CoreError;
use slurm_bridge_core::slurm::submit::ScriptInput;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonOrForm, SubmitPayload};
use crate::response::SubmitResponse;
use crate::state::AppState;

/// Query parameters for `/sbatch`.
#[derive(Debug, Deserialize)]
pub struct SubmitParams {
    /// Mandatory mode selector: `path` or `contents`.
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    /// Working directory for the spawned sbatch process.
    #[serde(rename = "outputDir")]
    pub output_dir: Option<String>,
}

/// POST /sbatch?inputType={path,contents}&outputDir=... -- submit a batch
/// script.
///
/// The body supplies `input` (a script path or inline script text, per the
/// selector). Selector and body problems are rejected with 400 before any
/// process is spawned or file created.
pub async fn submit_job(
    State(state): State<AppState>,
    Query(params): Query<SubmitParams>,
    JsonOrForm(payload): JsonOrForm<SubmitPayload>,
) -> AppResult<Json<SubmitResponse>> {
    let input = parse_script_input(&params, payload)?;
    let working_dir = params
        .output_dir
        .as_deref()
        .filter(|dir| !dir.is_empty())
        .map(Path::new);

    let outcome = state.slurm.submit(&input, working_dir).await;

    tracing::info!(
        returncode = outcome.status.returncode,
        job_id = ?outcome.job_id,
        "sbatch completed",
    );

    Ok(Json(SubmitResponse {
        status: outcome.status,
        job_id: outcome.job_id,
    }))
}

/// Resolve the mode selector and body into a typed [`ScriptInput`].
fn parse_script_input(
    params: &SubmitParams,
    payload: SubmitPayload,
) -> Result<ScriptInput, AppError> {
    let mode = params
        .input_type
        .as_deref()
        .ok_or(CoreError::MissingArgument("inputType"))?;
    let input = payload
        .input
        .ok_or(CoreError::MissingArgument("input"))?;

    match mode {
        "path" => Ok(ScriptInput::Path(input)),
        "contents" => Ok(ScriptInput::Contents(input)),
        other => Err(AppError::BadRequest(format!(
            "The query argument inputType needs to be either 'path' or 'contents', received {other}."
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
