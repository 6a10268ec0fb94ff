use anyhow::Result;
use codelab_runner::runner::javascript::{run_javascript, JsLimits};
use codelab_runner::runner::Language;

async fn run(source: &str) -> codelab_runner::runner::ExecutionResult {
    run_javascript(source.to_string(), JsLimits::default()).await
}

#[tokio::test]
async fn captures_logs_in_call_order() -> Result<()> {
    let result = run("console.log('one'); console.log('two'); console.log('three');").await;
    assert!(result.success);
    assert!(!result.code_errored);
    assert_eq!(result.language, Language::Javascript);
    assert_eq!(result.output, "one\ntwo\nthree");
    Ok(())
}

#[tokio::test]
async fn joins_multiple_arguments_with_spaces() -> Result<()> {
    let result = run("console.log('a', 1, true);").await;
    assert_eq!(result.output, "a 1 true");
    Ok(())
}

#[tokio::test]
async fn pretty_prints_objects() -> Result<()> {
    let result = run("console.log({ name: 'Ada', xp: 120 });").await;
    assert!(result.success);
    // 2-space indented JSON spans multiple lines
    assert!(result.output.contains("\"name\": \"Ada\""), "got: {}", result.output);
    assert!(result.output.contains("\"xp\": 120"), "got: {}", result.output);
    assert!(result.output.starts_with('{'));
    Ok(())
}

#[tokio::test]
async fn console_error_lines_are_prefixed() -> Result<()> {
    let result = run("console.error('boom');").await;
    assert_eq!(result.output, "[ERROR]: boom");
    assert!(!result.code_errored);
    Ok(())
}

#[tokio::test]
async fn silent_snippet_yields_sentinel() -> Result<()> {
    let result = run("const x = 2 + 2;").await;
    assert!(result.success);
    assert_eq!(result.output, "Code executed successfully! (No output)");
    Ok(())
}

// A throwing snippet still resolves with success: true. The harness worked;
// the error belongs to the submitted code and is reported as output text.
#[tokio::test]
async fn thrown_error_is_absorbed_into_output() -> Result<()> {
    let result = run("throw new Error('kaboom');").await;
    assert!(result.success);
    assert!(result.code_errored);
    assert!(result.output.starts_with("❌ JavaScript Error:"), "got: {}", result.output);
    assert!(result.output.contains("kaboom"));
    Ok(())
}

#[tokio::test]
async fn syntax_error_is_absorbed_into_output() -> Result<()> {
    let result = run("this is not javascript").await;
    assert!(result.success);
    assert!(result.code_errored);
    assert!(result.output.starts_with("❌ JavaScript Error:"));
    Ok(())
}

#[tokio::test]
async fn error_output_replaces_earlier_logs() -> Result<()> {
    let result = run("console.log('before'); throw new Error('after');").await;
    assert!(result.code_errored);
    assert!(!result.output.contains("before"));
    assert!(result.output.contains("after"));
    Ok(())
}

#[tokio::test]
async fn await_is_legal_at_top_level() -> Result<()> {
    let result = run("const v = await Promise.resolve(7); console.log(v);").await;
    assert!(result.success);
    assert!(!result.code_errored);
    assert_eq!(result.output, "7");
    Ok(())
}

#[tokio::test]
async fn logs_after_await_are_collected() -> Result<()> {
    let result = run(
        "console.log('first'); await Promise.resolve(); console.log('second');",
    )
    .await;
    assert_eq!(result.output, "first\nsecond");
    Ok(())
}

#[tokio::test]
async fn rejected_promise_reports_its_message() -> Result<()> {
    let result = run("await Promise.reject(new Error('nope'));").await;
    assert!(result.code_errored);
    assert!(result.output.contains("nope"), "got: {}", result.output);
    Ok(())
}

#[tokio::test]
async fn pure_snippets_are_idempotent() -> Result<()> {
    let source = "console.log([1, 2, 3].map(n => n * 2).join(','));";
    let first = run(source).await;
    let second = run(source).await;
    assert_eq!(first, second);
    assert_eq!(first.output, "2,4,6");
    Ok(())
}

#[tokio::test]
async fn console_shim_does_not_leak_between_runs() -> Result<()> {
    // The first run rebinds console inside its own engine; a later run must
    // see a fresh shim and an empty sink.
    let tamper = run("console.log('tampered'); globalThis.leak = 42;").await;
    assert_eq!(tamper.output, "tampered");
    let clean = run("console.log(typeof globalThis.leak);").await;
    assert_eq!(clean.output, "undefined");
    Ok(())
}
