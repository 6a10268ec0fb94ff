//! Embedded JavaScript execution with captured console output.
//!
//! Each call builds a fresh QuickJS runtime, installs a console shim whose
//! lines land in a per-call sink, evaluates the snippet as an async body,
//! and drives the job queue until it settles. Nothing is shared between
//! calls, so two executions can never observe each other's console.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use rquickjs::{CatchResultExt, CaughtError, Context, Function, Promise, Runtime, Value};

use super::{ExecutionResult, Language};
use crate::config::Config;

const NO_OUTPUT_SENTINEL: &str = "Code executed successfully! (No output)";

/// Resource caps for one evaluation. The engine has no preemption, so the
/// wall-clock limit is enforced through the interrupt handler.
#[derive(Debug, Clone, Copy)]
pub struct JsLimits {
    pub time_limit: Duration,
    pub memory_limit_bytes: usize,
}

impl Default for JsLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(5_000),
            memory_limit_bytes: 64 * 1024 * 1024,
        }
    }
}

impl JsLimits {
    pub fn from_config(cfg: &Config) -> Self {
        let mut limits = Self::default();
        if let Some(ms) = cfg.get("JS_TIME_LIMIT_MS").and_then(|v| v.parse::<u64>().ok()) {
            limits.time_limit = Duration::from_millis(ms);
        }
        if let Some(mb) = cfg.get("JS_MEMORY_LIMIT_MB").and_then(|v| v.parse::<usize>().ok()) {
            limits.memory_limit_bytes = mb * 1024 * 1024;
        }
        limits
    }
}

/// Console shim installed before the snippet runs. Object arguments are
/// pretty-printed as indented JSON when possible, everything else is
/// string-coerced; one call's arguments are joined with single spaces.
const CONSOLE_PRELUDE: &str = r#"
(function (push) {
  delete globalThis.__sink_push;
  const fmt = (arg) => {
    if (typeof arg === 'object') {
      try { return JSON.stringify(arg, null, 2); } catch (_) { return String(arg); }
    }
    return String(arg);
  };
  globalThis.console = {
    log: (...args) => push(args.map(fmt).join(' ')),
    error: (...args) => push('[ERROR]: ' + args.map(String).join(' ')),
  };
})(globalThis.__sink_push);
"#;

/// Run a snippet and fold every outcome into an [`ExecutionResult`].
///
/// A snippet that raises still yields `success: true` (the harness worked;
/// the error is reported in `output` and via `code_errored`). Only a
/// failure of the engine itself produces `success: false`.
pub async fn run_javascript(source: String, limits: JsLimits) -> ExecutionResult {
    match tokio::task::spawn_blocking(move || eval_snippet(&source, limits)).await {
        Ok(result) => result,
        Err(err) => ExecutionResult::harness_failure(
            Language::Javascript,
            format!("❌ Error: JavaScript worker failed: {err}"),
        ),
    }
}

fn eval_snippet(source: &str, limits: JsLimits) -> ExecutionResult {
    let (lines, error) = match capture_run(source, limits) {
        Ok(outcome) => outcome,
        Err(err) => {
            return ExecutionResult::harness_failure(
                Language::Javascript,
                format!("❌ Error: could not start the JavaScript engine: {err:#}"),
            )
        }
    };

    match error {
        Some(message) => ExecutionResult {
            success: true,
            output: format!("❌ JavaScript Error: {message}"),
            is_markup: false,
            language: Language::Javascript,
            code_errored: true,
        },
        None => {
            let output = if lines.is_empty() {
                NO_OUTPUT_SENTINEL.to_string()
            } else {
                lines.join("\n")
            };
            ExecutionResult::plain(Language::Javascript, output)
        }
    }
}

/// Evaluate with a fresh runtime. Returns the captured lines and, if the
/// snippet raised, the error message.
fn capture_run(source: &str, limits: JsLimits) -> Result<(Vec<String>, Option<String>)> {
    let runtime = Runtime::new()?;
    runtime.set_memory_limit(limits.memory_limit_bytes);

    let deadline = Instant::now() + limits.time_limit;
    let timed_out = Arc::new(AtomicBool::new(false));
    {
        let timed_out = Arc::clone(&timed_out);
        runtime.set_interrupt_handler(Some(Box::new(move || {
            if Instant::now() >= deadline {
                timed_out.store(true, Ordering::Relaxed);
                true
            } else {
                false
            }
        })));
    }

    let context = Context::full(&runtime)?;
    let sink: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let error = context.with(|ctx| -> Result<Option<String>> {
        let push = {
            let sink = Rc::clone(&sink);
            Function::new(ctx.clone(), move |line: String| {
                sink.borrow_mut().push(line);
            })?
        };
        ctx.globals().set("__sink_push", push)?;
        ctx.eval::<(), _>(CONSOLE_PRELUDE)
            .catch(&ctx)
            .map_err(|err| anyhow::anyhow!("console shim failed: {err}"))?;

        // Async IIFE so `await` is legal at the top level of the snippet.
        let wrapped = format!("(async () => {{\n{source}\n}})()");
        let promise = match ctx.eval::<Promise, _>(wrapped).catch(&ctx) {
            Ok(promise) => promise,
            Err(err) => return Ok(Some(caught_message(&err))),
        };
        match promise.finish::<Value>().catch(&ctx) {
            Ok(_) => Ok(None),
            // The snippet awaits something that can never resolve; keep
            // whatever it printed before suspending.
            Err(CaughtError::Error(rquickjs::Error::WouldBlock)) => Ok(None),
            Err(err) => Ok(Some(caught_message(&err))),
        }
    })?;

    runtime.set_interrupt_handler(None);

    let error = if error.is_some() && timed_out.load(Ordering::Relaxed) {
        Some(format!(
            "execution timed out after {} ms",
            limits.time_limit.as_millis()
        ))
    } else {
        error
    };

    let lines = sink.borrow().clone();
    Ok((lines, error))
}

fn caught_message(err: &CaughtError<'_>) -> String {
    match err {
        CaughtError::Exception(exception) => exception
            .message()
            .unwrap_or_else(|| "unknown error".to_string()),
        CaughtError::Value(value) => value
            .as_string()
            .and_then(|s| s.to_string().ok())
            .unwrap_or_else(|| "unknown error".to_string()),
        CaughtError::Error(err) => err.to_string(),
    }
}
