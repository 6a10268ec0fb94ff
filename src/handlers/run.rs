//! Single-snippet handler: run one source text and emit the result.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::runner::{CodeRunner, ExecutionRequest, Language};

pub async fn run(
    cfg: &Config,
    language: Language,
    source: String,
    output_path: Option<&Path>,
) -> Result<()> {
    let runner = CodeRunner::from_config(cfg)?;
    let result = runner
        .run(ExecutionRequest {
            source_code: source,
            language,
            auxiliary: None,
        })
        .await;
    super::emit(&result, output_path)
}
