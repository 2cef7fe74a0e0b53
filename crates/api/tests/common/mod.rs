//! Shared helpers for API integration tests.
//!
//! Builds the production router against stub Slurm binaries (bash scripts in
//! a tempdir) so tests exercise the full middleware stack without a real
//! scheduler. Mirrors the router construction in `main.rs`.

// Each integration test binary includes this module and uses a subset of it.
#![allow(dead_code)]

use std::io::Write as _;
use std::os::unix::fs::PermissionsExt as _;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use slurm_bridge_api::config::ServerConfig;
use slurm_bridge_api::router::build_app_router;
use slurm_bridge_api::state::AppState;

/// The username baked into test state in place of a real process identity.
pub const TEST_USER: &str = "testuser";

/// A tempdir of executable stubs standing in for the Slurm tools.
pub struct StubBin {
    dir: tempfile::TempDir,
}

impl StubBin {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create stub dir"),
        }
    }

    /// Write an executable bash stub named `name` with the given body and
    /// return its path.
    pub fn write(&self, name: &str, body: &str) -> String {
        let path = self.dir.path().join(name);
        let mut f = std::fs::File::create(&path).expect("create stub");
        writeln!(f, "#!/bin/bash").expect("write shebang");
        write!(f, "{body}").expect("write body");
        drop(f);

        let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod");

        path.to_str().expect("utf-8 path").to_string()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Build a test `ServerConfig`.
///
/// Every tool points at a path that does not exist, so a test that reaches
/// an unstubbed tool fails loudly with a spawn diagnostic instead of
/// touching a real scheduler. Tests override the tools they stub.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        squeue_path: "/nonexistent/squeue".to_string(),
        scancel_path: "/nonexistent/scancel".to_string(),
        scontrol_path: "/nonexistent/scontrol".to_string(),
        sbatch_path: "/nonexistent/sbatch".to_string(),
        temp_dir: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given config.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(config: ServerConfig) -> Router {
    let state = AppState {
        slurm: Arc::new(config.slurm()),
        config: Arc::new(config.clone()),
        username: Arc::from(TEST_USER),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a request carrying a JSON body.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a request carrying a URL-encoded form body.
pub async fn send_form(app: Router, method: Method, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
