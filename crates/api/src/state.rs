use std::sync::Arc;

use slurm_bridge_core::slurm::Slurm;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Handle to the Slurm CLI tools.
    pub slurm: Arc<Slurm>,
    /// OS user the server process runs as, resolved once at startup.
    ///
    /// Drives the `userOnly` queue filter and the `/user` endpoint; never
    /// taken from the request.
    pub username: Arc<str>,
}
