use std::time::Duration;

use anyhow::Result;
use axum::{http::StatusCode, routing::post, Json, Router};
use codelab_runner::runner::python::PythonClient;
use serde_json::{json, Value};

async fn spawn_mock(router: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn passes_through_a_successful_reply() -> Result<()> {
    let router = Router::new().route(
        "/api/run",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["language"], "python");
            assert_eq!(body["code"], "print('hi')");
            Json(json!({ "success": true, "output": "hi\n" }))
        }),
    );
    let base = spawn_mock(router).await?;

    let client = PythonClient::new(base, Duration::from_secs(5))?;
    let result = client.run("print('hi')").await;
    assert!(result.success);
    assert!(!result.code_errored);
    assert_eq!(result.output, "hi\n");
    Ok(())
}

#[tokio::test]
async fn passes_through_a_failed_execution() -> Result<()> {
    let router = Router::new().route(
        "/api/run",
        post(|| async { Json(json!({ "success": false, "output": "NameError: nope" })) }),
    );
    let base = spawn_mock(router).await?;

    let client = PythonClient::new(base, Duration::from_secs(5))?;
    let result = client.run("nope").await;
    assert!(!result.success);
    assert!(result.code_errored);
    assert_eq!(result.output, "NameError: nope");
    Ok(())
}

#[tokio::test]
async fn http_500_yields_remediation_and_error_text() -> Result<()> {
    let router = Router::new().route(
        "/api/run",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_mock(router).await?;

    let client = PythonClient::new(base, Duration::from_secs(5))?;
    let result = client.run("print('hi')").await;
    assert!(!result.success);
    assert!(result.output.contains("Could not connect to the Python runner server"));
    assert!(result.output.contains("codelab-runner --serve"));
    assert!(result.output.contains("500"), "got: {}", result.output);
    Ok(())
}

#[tokio::test]
async fn connection_refused_yields_remediation() -> Result<()> {
    // Nothing listens on port 1
    let client = PythonClient::new("http://127.0.0.1:1", Duration::from_secs(2))?;
    let result = client.run("print('hi')").await;
    assert!(!result.success);
    assert!(result.output.contains("Could not connect to the Python runner server"));
    assert!(result.output.contains("Error:"));
    Ok(())
}
