#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with an isolated HOME and config directory.
///
/// Inherited `ADFEED_*` variables are cleared; `envs` are set on top.
pub fn run_cli(args: &[&str], home: &Path, envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adfeed"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    for var in ["ADFEED_ENV", "ADFEED_BASE_URL", "ADFEED_IMAGE_BASE_URL", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd.envs(envs.iter().copied());
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], home: &Path, envs: &[(&str, &str)]) -> String {
    let output = run_cli(args, home, envs);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI off the async runtime so a mock server keeps serving.
pub async fn run_cli_async(args: Vec<String>, home: &Path) -> Output {
    let home = home.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &home, &[])
    })
    .await
    .expect("CLI task panicked")
}

/// Arguments pointing the CLI at a mock server.
pub fn mock_args(server_uri: &str, rest: &[&str]) -> Vec<String> {
    let mut args = vec![
        "--base-url".to_string(),
        server_uri.to_string(),
        "--image-base-url".to_string(),
        "https://images.test".to_string(),
    ];
    args.extend(rest.iter().map(|arg| arg.to_string()));
    args
}
