//! Handlers: one module per CLI mode.

pub mod combine;
pub mod run;
pub mod serve;

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::printer::ResultPrinter;
use crate::runner::ExecutionResult;

/// Print a result, or write it to `output_path` when one was given.
pub(crate) fn emit(result: &ExecutionResult, output_path: Option<&Path>) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(path, &result.output)
            .with_context(|| format!("could not write {}", path.display()))?;
        println!("Output written to {}", path.display());
        return Ok(());
    }
    ResultPrinter::default().print(result);
    Ok(())
}
