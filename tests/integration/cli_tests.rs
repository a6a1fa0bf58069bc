/*!
 * End-to-end tests running the compiled binary
 */

use std::path::Path;
use std::process::Output;
use tokio::process::Command;

use crate::common::{completion_body, spawn_stub, StubResponse};

const CONFIG_KEYS: [&str; 4] = [
    "AZURE_OPENAI_ENDPOINT",
    "AZURE_OPENAI_API_KEY",
    "AZURE_OPENAI_API_VERSION",
    "AZURE_OPENAI_DEPLOYMENT",
];

const PROXY_KEYS: [&str; 6] = ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];

/// Binary with a clean environment: no Azure settings, no proxies
///
/// Runs from the system temp directory so a developer's `.env` is never picked up.
fn tradutor() -> Command {
    tradutor_in(&std::env::temp_dir())
}

/// Binary with a clean environment, started in `dir`
fn tradutor_in(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tradutor"));
    for key in CONFIG_KEYS.iter().chain(PROXY_KEYS.iter()) {
        command.env_remove(key);
    }
    command.env("NO_PROXY", "127.0.0.1,localhost");
    command.current_dir(dir);
    command
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[tokio::test]
async fn test_cli_withoutConfig_shouldListMissingKeysAndExitOne() {
    let output = tradutor().arg("http://127.0.0.1:9/never").output().await.unwrap();

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_API_KEY"), "stderr: {}", err);
    assert!(!err.contains("AZURE_OPENAI_API_VERSION"));
    assert!(stdout(&output).is_empty());
}

#[tokio::test]
async fn test_cli_withOnlyKeyMissing_shouldNameOnlyTheKey() {
    let output = tradutor()
        .env("AZURE_OPENAI_ENDPOINT", "https://res.openai.azure.com")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Missing required configuration: AZURE_OPENAI_API_KEY"), "stderr: {}", err);
    assert!(!err.contains("configuration: AZURE_OPENAI_ENDPOINT"));
}

#[tokio::test]
async fn test_cli_withConfigAndNoUrl_shouldPrintUsageAndSucceed() {
    let output = tradutor()
        .env("AZURE_OPENAI_ENDPOINT", "https://res.openai.azure.com")
        .env("AZURE_OPENAI_API_KEY", "k")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Usage"));
    assert!(out.contains("--lang"));
    assert!(out.contains("Example:"));
}

#[tokio::test]
async fn test_cli_withNotFoundPage_shouldExitTwoWithoutTranslating() {
    let (page, _request) = spawn_stub(StubResponse::status(404)).await;

    // The endpoint points at a closed port: a translation attempt would fail with exit code 1
    let output = tradutor()
        .arg(&page)
        .env("AZURE_OPENAI_ENDPOINT", "http://127.0.0.1:9")
        .env("AZURE_OPENAI_API_KEY", "k")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("404"));
    assert!(stdout(&output).is_empty());
}

#[tokio::test]
async fn test_cli_withWorkingServices_shouldPrintTranslation() {
    let (page, _page_request) = spawn_stub(StubResponse::html("<p>Hello  World</p>")).await;
    let (endpoint, api_request) = spawn_stub(StubResponse::json(200, &completion_body("Olá\nMundo"))).await;

    let output = tradutor()
        .args([page.as_str(), "--lang", "português"])
        .env("AZURE_OPENAI_ENDPOINT", &endpoint)
        .env("AZURE_OPENAI_API_KEY", "k")
        .env("AZURE_OPENAI_DEPLOYMENT", "my-deployment")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Olá\nMundo\n");

    let api_request = api_request.await.unwrap();
    assert!(api_request.starts_with("POST /openai/deployments/my-deployment/chat/completions"));
    assert!(api_request.contains(r#"Traduza o seguinte texto para português:\n\nHello\nWorld"#));
}

#[tokio::test]
async fn test_cli_withOutputFlag_shouldWriteFile() {
    let (page, _page_request) = spawn_stub(StubResponse::html("<h1>Title</h1>")).await;
    let (endpoint, _api_request) = spawn_stub(StubResponse::json(200, &completion_body("# Título"))).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("artigo_pt.md");

    let output = tradutor()
        .arg(&page)
        .arg("-o")
        .arg(&path)
        .env("AZURE_OPENAI_ENDPOINT", &endpoint)
        .env("AZURE_OPENAI_API_KEY", "k")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Título");
    assert!(stdout(&output).is_empty());
}

#[tokio::test]
async fn test_cli_withRejectedKey_shouldFailWithProviderError() {
    let (page, _page_request) = spawn_stub(StubResponse::html("<p>Text</p>")).await;
    let (endpoint, _api_request) = spawn_stub(StubResponse::json(401, r#"{"error": "bad key"}"#)).await;

    let output = tradutor()
        .arg(&page)
        .env("AZURE_OPENAI_ENDPOINT", &endpoint)
        .env("AZURE_OPENAI_API_KEY", "wrong")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Authentication error"));
}

#[tokio::test]
async fn test_cli_completions_shouldNotRequireConfig() {
    let output = tradutor().args(["completions", "bash"]).output().await.unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("tradutor"));
}

#[tokio::test]
async fn test_cli_withDotEnvFile_shouldLoadConfiguration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "AZURE_OPENAI_ENDPOINT=https://res.openai.azure.com\nAZURE_OPENAI_API_KEY=from-dotenv\n",
    ).unwrap();

    let output = tradutor_in(dir.path()).output().await.unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Usage"));
}

#[tokio::test]
async fn test_cli_withEnvironmentAndDotEnv_shouldPreferEnvironment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "AZURE_OPENAI_API_KEY=from-dotenv\n").unwrap();
    let (page, _page_request) = spawn_stub(StubResponse::html("<p>Hi</p>")).await;
    let (endpoint, api_request) = spawn_stub(StubResponse::json(200, &completion_body("Oi"))).await;

    let output = tradutor_in(dir.path())
        .arg(&page)
        .env("AZURE_OPENAI_ENDPOINT", &endpoint)
        .env("AZURE_OPENAI_API_KEY", "from-environment")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let api_request = api_request.await.unwrap().to_lowercase();
    assert!(api_request.contains("api-key: from-environment"));
}

#[tokio::test]
async fn test_cli_withoutConfig_shouldPointToEnvExample() {
    let output = tradutor().arg("http://127.0.0.1:9/never").output().await.unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".env.example"));
}

