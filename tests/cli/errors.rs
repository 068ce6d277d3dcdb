//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("check")
                .and(predicate::str::contains("sync"))
                .and(predicate::str::contains("classify"))
                .and(predicate::str::contains("policy"))
                .and(predicate::str::contains("completions")),
        );
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd().arg("unknown-command").assert().failure().code(2);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("secret-sync "));
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let t = Test::new().with_env("SECRET_SYNC_SOURCE_JSON", SOURCE_CATALOG);

    let output = t.run(&[
        "--verbose",
        "sync",
        "--target",
        TARGET_REPO,
        "--secrets",
        "REGISTRY_PASSWORD",
        "--dry-run",
    ]);
    assert_success(&output);
    assert_stderr_contains(&output, "dispatching sync request");
}

#[test]
fn test_json_log_format() {
    let t = Test::new()
        .with_env("SECRET_SYNC_SOURCE_JSON", SOURCE_CATALOG)
        .with_env("SECRET_SYNC_LOG", "secret_sync=info")
        .with_env("SECRET_SYNC_LOG_FORMAT", "json");

    let output = t.run(&[
        "sync",
        "--target",
        TARGET_REPO,
        "--secrets",
        "REGISTRY_PASSWORD",
        "--dry-run",
    ]);
    assert_success(&output);
    let first = stderr(&output);
    let line = first.lines().next().expect("no log output");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["level"], "INFO");
}

#[test]
fn test_secret_values_never_logged() {
    let t = Test::new()
        .with_env("SECRET_SYNC_SOURCE_JSON", SOURCE_CATALOG)
        .with_env("SECRET_SYNC_LOG", "secret_sync=trace");

    let output = t.run(&[
        "sync",
        "--target",
        TARGET_REPO,
        "--secrets",
        "REGISTRY_PASSWORD",
        "--dry-run",
    ]);
    assert_success(&output);
    assert!(!stderr(&output).contains("hunter2"));
    assert!(!stdout(&output).contains("hunter2"));
}

#[test]
fn test_invalid_config_reported() {
    let t = Test::new();
    t.write_config("[sync]\nconcurrency = 0\n");

    let output = t.run(&["policy"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "sync.concurrency");
}

#[test]
fn test_unknown_config_key_rejected() {
    let t = Test::new();
    t.write_config("[sync]\nparallelism = 3\n");

    let output = t.run(&["policy"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_explicit_config_path() {
    let t = Test::new();
    let path = t.dir.path().join("custom.toml");
    std::fs::write(&path, "[policy]\nunknown = \"allow\"\n").unwrap();

    let output = t.run(&["--config", path.to_str().unwrap(), "classify", "BRAND_NEW"]);
    assert_success(&output);
    assert_stdout_contains(&output, "syncable");
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "powershell"] {
        t.cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("secret-sync"));
    }
}

#[test]
fn test_error_hint_for_missing_catalog() {
    let t = Test::new();

    let output = t.run(&["sync", "--target", TARGET_REPO, "--secrets", "A", "--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "or pass --catalog FILE");
    assert_stdout_excludes(&output, "→");
}
