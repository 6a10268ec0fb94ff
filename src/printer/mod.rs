//! Terminal output for execution results.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::runner::ExecutionResult;

pub struct ResultPrinter {
    pub color: bool,
}

impl Default for ResultPrinter {
    fn default() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }
}

impl ResultPrinter {
    /// Markup documents print verbatim (callers usually redirect them to a
    /// file); plain output is colored red when something went wrong.
    pub fn print(&self, result: &ExecutionResult) {
        if result.is_markup || !self.color {
            println!("{}", result.output);
            return;
        }
        if !result.success || result.code_errored {
            println!("{}", result.output.red());
        } else {
            println!("{}", result.output);
        }
    }
}
