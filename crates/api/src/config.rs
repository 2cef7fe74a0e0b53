use std::path::PathBuf;

use slurm_bridge_core::slurm::Slurm;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development on a
/// cluster login node. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must stay above the
    /// 60-second Slurm command deadline so a slow tool surfaces as a JSON
    /// envelope rather than a 408.
    pub request_timeout_secs: u64,
    /// Path to the `squeue` binary (default: bare name, resolved via `PATH`).
    pub squeue_path: String,
    /// Path to the `scancel` binary (default: bare name, resolved via `PATH`).
    pub scancel_path: String,
    /// Path to the `scontrol` binary (default: bare name, resolved via `PATH`).
    pub scontrol_path: String,
    /// Path to the `sbatch` binary (default: bare name, resolved via `PATH`).
    pub sbatch_path: String,
    /// Directory for staging inline submission scripts (system temp dir if
    /// unset).
    pub temp_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                       |
    /// | `SQUEUE_PATH`          | `squeue`                   |
    /// | `SCANCEL_PATH`         | `scancel`                  |
    /// | `SCONTROL_PATH`        | `scontrol`                 |
    /// | `SBATCH_PATH`          | `sbatch`                   |
    /// | `SLURM_TEMP_DIR`       | unset (system temp dir)    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let squeue_path = std::env::var("SQUEUE_PATH").unwrap_or_else(|_| "squeue".into());
        let scancel_path = std::env::var("SCANCEL_PATH").unwrap_or_else(|_| "scancel".into());
        let scontrol_path = std::env::var("SCONTROL_PATH").unwrap_or_else(|_| "scontrol".into());
        let sbatch_path = std::env::var("SBATCH_PATH").unwrap_or_else(|_| "sbatch".into());

        let temp_dir = std::env::var("SLURM_TEMP_DIR").ok().map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            squeue_path,
            scancel_path,
            scontrol_path,
            sbatch_path,
            temp_dir,
        }
    }

    /// Build the core [`Slurm`] handle from the configured tool paths.
    pub fn slurm(&self) -> Slurm {
        Slurm {
            squeue: self.squeue_path.clone(),
            scancel: self.scancel_path.clone(),
            scontrol: self.scontrol_path.clone(),
            sbatch: self.sbatch_path.clone(),
            temp_dir: self.temp_dir.clone(),
        }
    }
}
