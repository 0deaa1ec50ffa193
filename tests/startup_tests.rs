//! Integration tests for server startup.
//!
//! These run the built binary, so they only cover paths that exit before the
//! stdio transport starts.

use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const NOTION_VARS: &[&str] = &[
    "NOTION_API_KEY",
    "NOTION_DATABASE_ID",
    "NOTION_API_BASE_URL",
    "NOTION_VERSION",
    "NOTION_DEV_LOGGER_CONFIG",
    "RUST_LOG",
];

/// Run the server with a clean Notion environment and an empty home directory.
fn run_server(home: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notion-dev-logger"));
    for var in NOTION_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home.path())
        .envs(env.iter().copied())
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("run notion-dev-logger")
}

#[test]
fn missing_configuration_exits_with_status_one() {
    let home = TempDir::new().unwrap();
    let output = run_server(&home, &[], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout is reserved for the protocol");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NOTION_API_KEY"), "stderr: {stderr}");
    assert!(stderr.contains("NOTION_DATABASE_ID"), "stderr: {stderr}");
    assert_eq!(
        stderr.matches("missing required configuration").count(),
        1,
        "reported once, stderr: {stderr}"
    );
}

#[test]
fn missing_database_id_is_named() {
    let home = TempDir::new().unwrap();
    let output = run_server(&home, &["--log", "off"], &[("NOTION_API_KEY", "secret_x")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("missing required configuration: NOTION_DATABASE_ID"),
        "stderr: {stderr}"
    );
    assert!(!stderr.contains("secret_x"));
}

#[test]
fn zero_timeout_in_config_file_exits() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.yaml");
    std::fs::write(&path, "notion:\n  timeout_secs: 0\n").unwrap();

    let output = run_server(
        &home,
        &["--config", path.to_str().unwrap()],
        &[("NOTION_API_KEY", "secret_x"), ("NOTION_DATABASE_ID", "db")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("notion.timeout_secs"), "stderr: {stderr}");
}
