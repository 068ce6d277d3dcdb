//! Test fixtures and constants.

/// Token handed to the binary; the mock server accepts any.
pub const TEST_TOKEN: &str = "ghp_test_token";

/// Repository the dispatcher runs in.
pub const SOURCE_REPO: &str = "acme/platform-secrets";

/// Service repository receiving secrets.
pub const TARGET_REPO: &str = "acme/svc-a";

/// Source catalog as the dispatcher workflow serialises it.
///
/// Includes the platform's own lowercase `github_token` entry and a value
/// with trailing newlines that must survive untouched.
pub const SOURCE_CATALOG: &str = r#"{
  "github_token": "ghs_platform_injected",
  "REGISTRY_PASSWORD": "hunter2",
  "DATABASE_PASSWORD": "line one\nline two\n\n",
  "KUBE_CONFIG": "apiVersion: v1\nkind: Config\n",
  "NPM_TOKEN": "  padded  "
}"#;

/// Config naming the source repository.
pub const SOURCE_CONFIG: &str = r#"
[source]
repo = "acme/platform-secrets"
"#;
