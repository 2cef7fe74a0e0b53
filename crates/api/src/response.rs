//! Shared response payload types for API handlers.
//!
//! The cancel and control endpoints serialize a bare
//! [`CommandStatus`](slurm_bridge_core::slurm::CommandStatus); the types
//! here cover the endpoints that add fields on top of it. Using typed
//! payloads instead of ad-hoc `serde_json::json!` keeps the wire field
//! names in one place.

use serde::Serialize;
use slurm_bridge_core::slurm::CommandStatus;

/// `/squeue` response: parsed rows plus the invocation status.
#[derive(Debug, Serialize)]
pub struct QueueResponse {
    /// One 8-field row per job, in squeue's own order.
    pub data: Vec<Vec<String>>,
    /// Status of the underlying squeue call; non-zero returncodes coexist
    /// with whatever partial rows were parsed.
    pub squeue: CommandStatus,
}

/// `/sbatch` response: the envelope plus the best-effort job ID.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub status: CommandStatus,
    /// Extracted from the tail of sbatch's stdout when possible; omitted
    /// otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

/// `/user` response payload.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The OS user the server process runs as.
    pub user: String,
}
