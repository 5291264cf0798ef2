use std::path::Path;
use std::process::Output;

use tokio::process::Command;

/// Run the CLI against `api` with an isolated session file.
pub async fn run_cli(args: &[&str], store: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nexus"));
    cmd.args(args);
    cmd.env("NEXUS_STORE", store);
    cmd.env("NEXUS_API", api);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("NEXUS_APP");
    cmd.env_remove("NEXUS_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], store: &Path, api: &str) -> String {
    let output = run_cli(args, store, api).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(args: &[&str], store: &Path, api: &str) -> String {
    let output = run_cli(args, store, api).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
