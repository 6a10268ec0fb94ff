//! Execution engine: request/result types and language dispatch.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub mod javascript;
pub mod markup;
pub mod python;

/// Languages the lab can preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Html,
    Css,
    Python,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Javascript => "javascript",
            Language::Html => "html",
            Language::Css => "css",
            Language::Python => "python",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::Javascript),
            "html" => Ok(Language::Html),
            "css" => Ok(Language::Css),
            "python" | "py" => Ok(Language::Python),
            other => anyhow::bail!("unknown language: {other}"),
        }
    }
}

/// A three-file web bundle edited side by side in the lab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleSource {
    pub html_code: String,
    pub css_code: String,
    pub js_code: String,
}

/// One snippet (or bundle) to execute. Which fields are meaningful is
/// determined by `language`; a present `auxiliary` bundle takes precedence
/// over `source_code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<BundleSource>,
}

/// Outcome of one execution.
///
/// `success` reports whether the harness itself operated correctly;
/// `code_errored` reports whether the submitted code raised. `output` is
/// always human-readable text, and when `is_markup` is set it is a complete
/// HTML document for an isolated preview surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub is_markup: bool,
    pub language: Language,
    pub code_errored: bool,
}

impl ExecutionResult {
    pub(crate) fn plain(language: Language, output: String) -> Self {
        Self {
            success: true,
            output,
            is_markup: false,
            language,
            code_errored: false,
        }
    }

    pub(crate) fn markup(language: Language, output: String) -> Self {
        Self {
            success: true,
            output,
            is_markup: true,
            language,
            code_errored: false,
        }
    }

    pub(crate) fn harness_failure(language: Language, output: String) -> Self {
        Self {
            success: false,
            output,
            is_markup: false,
            language,
            code_errored: false,
        }
    }
}

/// Unified entry point: routes a request to the right sub-runner.
pub struct CodeRunner {
    limits: javascript::JsLimits,
    python: python::PythonClient,
}

impl CodeRunner {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self {
            limits: javascript::JsLimits::from_config(cfg),
            python: python::PythonClient::from_config(cfg)?,
        })
    }

    /// Never returns an error past this boundary: every failure mode is
    /// folded into the returned [`ExecutionResult`].
    pub async fn run(&self, request: ExecutionRequest) -> ExecutionResult {
        if let Some(bundle) = &request.auxiliary {
            return markup::combine_bundle(&bundle.html_code, &bundle.css_code, &bundle.js_code);
        }
        match request.language {
            Language::Javascript => {
                javascript::run_javascript(request.source_code, self.limits).await
            }
            Language::Html | Language::Css => {
                markup::package_markup(request.language, &request.source_code)
            }
            Language::Python => self.python.run(&request.source_code).await,
        }
    }
}
