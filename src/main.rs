use anyhow::{bail, Context as _, Result};
use is_terminal::IsTerminal;
use std::io::{self, Read as _};

use codelab_runner::{cli, config::Config, handlers, runner::Language};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Cli::parse();
    let cfg = Config::load();

    // Optional: per-run JS deadline override before anything reads config
    if let Some(ms) = args.timeout {
        std::env::set_var("JS_TIME_LIMIT_MS", ms.to_string());
    }

    if args.serve {
        if args.code.is_some() || args.file.is_some() {
            bail!("--serve cannot be combined with a snippet");
        }
        let port = args
            .port
            .or_else(|| cfg.get("SERVER_PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(5000);
        return handlers::serve::run(&cfg, port).await;
    }

    if args.combined {
        return handlers::combine::run(
            args.html.as_deref(),
            args.css.as_deref(),
            args.js.as_deref(),
            args.output.as_deref(),
        )
        .await;
    }

    // Resolve source: positional, file, or piped stdin
    let mut source = String::new();
    if let Some(code) = args.code {
        source = code;
    } else if let Some(path) = &args.file {
        source = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
    } else if !io::stdin().is_terminal() {
        io::stdin().read_to_string(&mut source)?;
    }
    if source.trim().is_empty() {
        bail!("Provide a snippet as an argument, via --file, or on stdin");
    }

    // Resolve language: CLI overrides config; fall back to javascript
    let language = args
        .lang
        .or_else(|| cfg.get("DEFAULT_LANGUAGE").and_then(|v| v.parse().ok()))
        .unwrap_or(Language::Javascript);

    handlers::run::run(&cfg, language, source, args.output.as_deref()).await
}
