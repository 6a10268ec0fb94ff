//! Remote Python execution: thin client for the companion server.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ExecutionResult, Language};
use crate::config::Config;

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    code: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    success: bool,
    output: String,
}

/// HTTP client for the companion server's `POST /api/run` endpoint.
/// Single attempt, fail fast; remediation is left to the human operator.
#[derive(Debug, Clone)]
pub struct PythonClient {
    client: Client,
    base: String,
}

impl PythonClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let base = cfg
            .get("RUNNER_SERVER_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let timeout_secs = cfg
            .get("REQUEST_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        Self::new(base, Duration::from_secs(timeout_secs))
    }

    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Forward a snippet and fold every failure into an [`ExecutionResult`].
    pub async fn run(&self, code: &str) -> ExecutionResult {
        match self.request(code).await {
            Ok(reply) => ExecutionResult {
                success: reply.success,
                output: reply.output,
                is_markup: false,
                language: Language::Python,
                code_errored: !reply.success,
            },
            Err(err) => {
                log::debug!("python run failed: {err:#}");
                ExecutionResult::harness_failure(Language::Python, remediation(&err))
            }
        }
    }

    async fn request(&self, code: &str) -> Result<RunResponse> {
        let url = format!("{}/api/run", self.base.trim_end_matches('/'));
        let body = RunRequest {
            code,
            language: "python",
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("could not reach the code runner server")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Server error: {status}");
        }
        resp.json::<RunResponse>()
            .await
            .context("invalid response from the code runner server")
    }
}

fn remediation(err: &anyhow::Error) -> String {
    format!(
        "❌ Could not connect to the Python runner server.\n\n\
         Make sure the companion server is running:\n\
         1. Run: codelab-runner --serve\n\
         2. Check that Python is installed and on your PATH (or set PYTHON_BIN)\n\n\
         Error: {err:#}"
    )
}
