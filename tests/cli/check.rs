//! Tests for `secret-sync check`.

use crate::support::*;

async fn partial_repo() -> MockGitHub {
    let github = MockGitHub::start().await;
    github.mount_list(TARGET_REPO, &["A", "UNRELATED"]).await;
    github
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_present_succeeds() {
    let github = MockGitHub::start().await;
    github.mount_list(TARGET_REPO, &["A", "B"]).await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A", "B"], &["--ci"]).await;
    assert_success(&output);
    assert_stdout_contains(&output, "✓ A present");
    assert_stdout_contains(&output, "✓ B present");
    assert_stdout_excludes(&output, "missing");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_in_ci_fails() {
    let github = partial_repo().await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A", "B"], &["--ci"]).await;
    assert_exit_code(&output, 1);
    assert_stdout_contains(&output, "✓ A present");
    assert_stdout_contains(&output, "✗ B missing");
    assert_stdout_contains(
        &output,
        "secret-sync sync --target acme/svc-a --secrets \"B\"",
    );
    assert_stdout_contains(
        &output,
        "https://github.com/acme/svc-a/settings/secrets/actions",
    );
    assert_stderr_contains(&output, "required secrets missing: B");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ci_detected_from_environment() {
    let github = partial_repo().await;
    let t = Test::new()
        .against(&github, TARGET_REPO)
        .with_env("GITHUB_ACTIONS", "true");

    let output = t.check(&["A", "B"], &[]).await;
    assert_failure(&output);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_locally_warns() {
    let github = partial_repo().await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A", "B"], &["--local"]).await;
    assert_success(&output);
    assert_stdout_contains(&output, "✓ A present");
    assert_stdout_contains(&output, "✗ B missing");
    assert_stdout_contains(&output, "continuing outside CI");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_local_flag_overrides_ci_environment() {
    let github = partial_repo().await;
    let t = Test::new()
        .against(&github, TARGET_REPO)
        .with_env("CI", "true");

    let output = t.check(&["A", "B"], &["--local"]).await;
    assert_success(&output);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remediation_names_workflow_when_source_configured() {
    let github = partial_repo().await;
    let t = Test::new().against(&github, TARGET_REPO);
    t.write_config(SOURCE_CONFIG);

    let output = t.check(&["A", "B", "C"], &["--local"]).await;
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "gh workflow run sync-secrets.yml --repo acme/platform-secrets -f target_repo=acme/svc-a -f secrets=\"B C\"",
    );
    assert_stdout_contains(
        &output,
        "https://github.com/acme/platform-secrets/actions/workflows/sync-secrets.yml",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_comma_separated_names() {
    let github = partial_repo().await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A,B"], &["--local"]).await;
    assert_stdout_contains(&output, "✓ A present");
    assert_stdout_contains(&output, "✗ B missing");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listing_failure_in_ci_fails() {
    let github = MockGitHub::start().await;
    github.mount_status(TARGET_REPO, 401).await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A"], &["--ci"]).await;
    assert_failure(&output);
    assert_stderr_contains(&output, "not authorized");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listing_failure_locally_warns() {
    let github = MockGitHub::start().await;
    github.mount_status(TARGET_REPO, 404).await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["A"], &["--local"]).await;
    assert_success(&output);
    assert_stdout_contains(&output, "could not check secrets");
}

#[test]
fn test_missing_token_in_ci_fails() {
    let t = Test::new().with_env("GITHUB_REPOSITORY", TARGET_REPO);

    let output = t.run(&["check", "A", "--ci"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no platform token");
}

#[test]
fn test_invalid_name_rejected() {
    let t = Test::new();

    let output = t.run(&["check", "lower-case", "--local"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name");
}

#[test]
fn test_ci_and_local_conflict() {
    let t = Test::new();

    let output = t.run(&["check", "A", "--ci", "--local"]);
    assert_failure(&output);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lines_follow_request_order() {
    let github = MockGitHub::start().await;
    github.mount_list(TARGET_REPO, &["A", "C"]).await;
    let t = Test::new().against(&github, TARGET_REPO);

    let output = t.check(&["C", "B", "A"], &["--local"]).await;
    assert_success(&output);
    let out = stdout(&output);
    let lines: Vec<&str> = out
        .lines()
        .filter(|l| l.ends_with(" present") || l.ends_with(" missing"))
        .collect();
    assert_eq!(lines, vec!["✓ C present", "✗ B missing", "✓ A present"]);
}
