//! Companion HTTP server: executes Python snippets for the lab.
//!
//! Exposes `POST /api/run` with body `{code, language}` and reply
//! `{success, output}`. HTTP status stays 200 for execution failures;
//! `success` carries the verdict, matching what the remote client expects.

use std::io::Write as _;
use std::net::SocketAddr;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::Config;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub code: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,
    pub output: String,
}

#[derive(Debug, Clone)]
struct ServerState {
    python_bin: String,
    run_timeout: Duration,
}

impl ServerState {
    fn from_config(cfg: &Config) -> Self {
        Self {
            python_bin: cfg.get("PYTHON_BIN").unwrap_or_else(|| "python3".into()),
            run_timeout: Duration::from_secs(cfg.get_u64("PYTHON_TIMEOUT").unwrap_or(10)),
        }
    }
}

pub fn router(cfg: &Config) -> Router {
    let state = Arc::new(ServerState::from_config(cfg));
    Router::new()
        .route("/api/run", post(run_code))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(cfg: &Config, port: u16) -> Result<()> {
    let app = router(cfg);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    log::info!("code runner server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_code(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RunRequest>,
) -> Json<RunResponse> {
    let reply = match req.language.as_str() {
        "python" => run_python(&state, &req.code).await,
        other => RunResponse {
            success: false,
            output: format!("Unsupported language: {other}"),
        },
    };
    Json(reply)
}

async fn run_python(state: &ServerState, code: &str) -> RunResponse {
    match run_python_inner(state, code).await {
        Ok(reply) => reply,
        Err(err) => {
            log::warn!("python execution failed: {err:#}");
            RunResponse {
                success: false,
                output: format!("Failed to run Python: {err:#}"),
            }
        }
    }
}

async fn run_python_inner(state: &ServerState, code: &str) -> Result<RunResponse> {
    let mut file = tempfile::Builder::new()
        .prefix("lab-snippet-")
        .suffix(".py")
        .tempfile()
        .context("could not create a temp file for the snippet")?;
    file.write_all(code.as_bytes())?;
    file.flush()?;

    let mut cmd = tokio::process::Command::new(&state.python_bin);
    cmd.arg(file.path())
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(state.run_timeout, cmd.output()).await {
        Ok(done) => done.with_context(|| format!("could not start `{}`", state.python_bin))?,
        Err(_) => {
            return Ok(RunResponse {
                success: false,
                output: format!(
                    "Execution timed out after {} seconds",
                    state.run_timeout.as_secs()
                ),
            })
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        Ok(RunResponse {
            success: true,
            output: stdout,
        })
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut combined = stdout;
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(stderr.trim_end());
        Ok(RunResponse {
            success: false,
            output: combined,
        })
    }
}
