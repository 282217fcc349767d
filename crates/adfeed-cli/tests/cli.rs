//! CLI integration tests against a mock API server.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{mock_args, run_cli, run_cli_async, run_cli_success};

const ADS_PATH: &str = "/v2/search/items/geo";

async fn mount_pages(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(ADS_PATH))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "a1", "title": "Chair", "description": "d", "pictures": ["pic1"]}],
            "paging": {"after": "cursor2", "before": null, "pageLength": 1}
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(ADS_PATH))
        .and(query_param("after", "cursor2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "a2", "title": "Table", "description": "e", "pictures": []}],
            "paging": {"after": null, "before": "cursor1", "pageLength": 1}
        })))
        .mount(server)
        .await;
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// page
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_page_json() {
    let server = MockServer::start().await;
    mount_pages(&server).await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(mock_args(&server.uri(), &["page", "--json"]), home.path()).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let page: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(page["data"][0]["id"], "a1");
    assert_eq!(
        page["data"][0]["picture_thumb"],
        "https://images.test/pic1/squares/125"
    );
    assert_eq!(page["paging"]["after"], "cursor2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_forwards_cursor_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ADS_PATH))
        .and(query_param("limit", "5"))
        .and(query_param("after", "cursor2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "paging": {"after": null, "before": null, "pageLength": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(
        mock_args(&server.uri(), &["page", "--after", "cursor2", "--limit", "5"]),
        home.path(),
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("No ads found."));
}

// ============================================================================
// feed
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_walks_every_page() {
    let server = MockServer::start().await;
    mount_pages(&server).await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(mock_args(&server.uri(), &["feed", "--json"]), home.path()).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let ids: Vec<String> = stdout(&output)
        .lines()
        .map(|line| {
            let ad: Value = serde_json::from_str(line).unwrap();
            ad["id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(ids, ["a1", "a2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_stops_at_page_limit() {
    let server = MockServer::start().await;
    mount_pages(&server).await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(
        mock_args(&server.uri(), &["feed", "--pages", "1"]),
        home.path(),
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Chair"));
    assert!(!out.contains("Table"));
    assert!(stderr(&output).contains("cursor2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ADS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(mock_args(&server.uri(), &["feed"]), home.path()).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("500"), "stderr: {}", stderr(&output));
}

// ============================================================================
// detail
// ============================================================================

async fn mount_detail(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/api/v0.19/articles/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "a1",
            "title": "Chair",
            "description": "Wooden chair",
            "pictures": [{"squares300": "https://cdn/300", "squares600": "https://cdn/600"}]
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_detail_both_styles() {
    let server = MockServer::start().await;
    mount_detail(&server).await;
    let home = TempDir::new().unwrap();

    for style in [&["detail", "a1", "--json"][..], &["detail", "a1", "--stream", "--json"]] {
        let output = run_cli_async(mock_args(&server.uri(), style), home.path()).await;
        assert!(output.status.success(), "stderr: {}", stderr(&output));

        let ad: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(ad["title"], "Chair");
        assert_eq!(ad["picture_large"], "https://cdn/600");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_detail_human_output() {
    let server = MockServer::start().await;
    mount_detail(&server).await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(mock_args(&server.uri(), &["detail", "a1"]), home.path()).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wooden chair"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_detail_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/v0.19/articles/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let output = run_cli_async(
        mock_args(&server.uri(), &["detail", "missing", "--stream"]),
        home.path(),
    )
    .await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("404"), "stderr: {}", stderr(&output));
}

// ============================================================================
// config
// ============================================================================

fn config_json(home: &std::path::Path, args: &[&str], envs: &[(&str, &str)]) -> Value {
    let mut full = args.to_vec();
    full.extend(["config", "--json"]);
    serde_json::from_str(&run_cli_success(&full, home, envs)).unwrap()
}

#[test]
fn test_config_defaults() {
    let home = TempDir::new().unwrap();

    let config = config_json(home.path(), &[], &[]);

    assert_eq!(config["environment"], "prod");
    assert_eq!(config["base_url"], "https://prod.geev.fr");
    assert_eq!(config["image_base_url"], "https://images.geev.fr");
    assert_eq!(config["page_size"], 26);
    assert_eq!(config["config_file"], Value::Null);
}

#[test]
fn test_config_file_from_default_location() {
    let home = TempDir::new().unwrap();
    let path = run_cli_success(&["config", "--path"], home.path(), &[]);
    let path = std::path::PathBuf::from(path.trim());
    assert!(path.starts_with(home.path()));

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"environment": "staging", "page_size": 12}"#).unwrap();

    let config = config_json(home.path(), &[], &[]);

    assert_eq!(config["environment"], "staging");
    assert_eq!(config["base_url"], "https://stage.geev.fr");
    assert_eq!(config["page_size"], 12);
    assert_eq!(config["config_file"], path.to_str().unwrap());
}

#[test]
fn test_config_layering() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("custom.json");
    std::fs::write(
        &file,
        r#"{"base_url": "https://file.test", "image_base_url": "https://images.file.test", "timeout_secs": 9}"#,
    )
    .unwrap();
    let file = file.to_str().unwrap();

    let config = config_json(home.path(), &["--config", file], &[]);
    assert_eq!(config["base_url"], "https://file.test");
    assert_eq!(config["timeout_secs"], 9);

    // Environment beats the file.
    let envs = [("ADFEED_BASE_URL", "https://env.test")];
    let config = config_json(home.path(), &["--config", file], &envs);
    assert_eq!(config["base_url"], "https://env.test");
    assert_eq!(config["image_base_url"], "https://images.file.test");

    // Flags beat the environment.
    let config = config_json(
        home.path(),
        &["--config", file, "--base-url", "https://flag.test", "--timeout", "2"],
        &envs,
    );
    assert_eq!(config["base_url"], "https://flag.test");
    assert_eq!(config["timeout_secs"], 2);
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let home = TempDir::new().unwrap();

    let output = run_cli(&["--base-url", "http://example.com", "config"], home.path(), &[]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("HTTPS"), "stderr: {}", stderr(&output));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("broken.json");
    std::fs::write(&file, r#"{"environment": "moon"}"#).unwrap();

    let output = run_cli(&["--config", file.to_str().unwrap(), "config"], home.path(), &[]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid config file"));
}
