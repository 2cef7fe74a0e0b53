//! Route definitions for the Slurm operation endpoints.
//!
//! Argument conventions, kept consistent across the surface: query
//! arguments configure how a command runs (filters, mode selectors, output
//! directory); body arguments supply job or script designators; path
//! segments supply sub-command verbs.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Slurm operation routes, mounted at the root.
///
/// ```text
/// GET    /squeue               queue listing (?userOnly=)
/// DELETE /scancel              cancel one job (body: jobID)
/// PATCH  /scontrol/{action}    hold/release one job (body: jobID)
/// POST   /sbatch               submit a script (?inputType=&outputDir=)
/// GET    /user                 server process user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/squeue", get(handlers::queue::list_queue))
        .route("/scancel", delete(handlers::cancel::cancel_job))
        .route("/scontrol/{action}", patch(handlers::control::control_job))
        .route("/sbatch", post(handlers::submit::submit_job))
        .route("/user", get(handlers::user::current_user))
}
