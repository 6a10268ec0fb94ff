use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::runner::Language;

#[derive(Parser, Debug, Clone)]
#[command(name = "codelab-runner", about = "Multi-language preview runner for the coding lab", version)]
#[command(group(ArgGroup::new("mode").args(["combined", "serve"]).multiple(false)))]
#[command(group(ArgGroup::new("source").args(["code", "file"]).multiple(false)))]
pub struct Cli {
    /// Source code to run (or pipe it on stdin).
    #[arg(value_name = "CODE")]
    pub code: Option<String>,

    /// Language of the snippet.
    #[arg(long, value_enum)]
    pub lang: Option<Language>,

    /// Read the snippet from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Combine --html/--css/--js files into one preview page.
    #[arg(long)]
    pub combined: bool,

    /// HTML file for --combined.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// CSS file for --combined.
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// JavaScript file for --combined.
    #[arg(long)]
    pub js: Option<PathBuf>,

    /// Write the result to a file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Run the Python companion server.
    #[arg(long)]
    pub serve: bool,

    /// Port for --serve.
    #[arg(long)]
    pub port: Option<u16>,

    /// Wall-clock limit for JavaScript execution, in milliseconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
