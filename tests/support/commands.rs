//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that change behaviour and must not leak in from the host.
const SCRUBBED: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
    "GITHUB_SERVER_URL",
    "GH_TOKEN",
    "GITHUB_TOKEN",
    "SECRET_SYNC_CONFIG",
    "SECRET_SYNC_LOG",
    "SECRET_SYNC_LOG_FORMAT",
    "SECRET_SYNC_SOURCE_JSON",
    "SECRET_SYNC_SOURCE_REPO",
    "TARGET_REPO",
    "SECRETS",
];

impl Test {
    /// Create a secret-sync command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - Current directory set to the test working directory
    /// - NO_COLOR so output can be matched verbatim
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secret-sync").expect("failed to find secret-sync binary");
        for key in SCRUBBED {
            cmd.env_remove(key);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run `secret-sync` with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run secret-sync")
    }

    /// Run `args` off the async runtime so a mock server in the same test
    /// keeps serving.
    pub async fn run_async(&self, args: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(args);
        tokio::task::spawn_blocking(move || cmd.output().expect("failed to run secret-sync"))
            .await
            .expect("command task panicked")
    }

    /// Shortcut for `secret-sync check`.
    pub async fn check(&self, names: &[&str], flags: &[&str]) -> Output {
        let mut args = vec!["check"];
        args.extend_from_slice(names);
        args.extend_from_slice(flags);
        self.run_async(&args).await
    }

    /// Shortcut for `secret-sync sync --target T --secrets S`.
    pub async fn sync(&self, target: &str, secrets: &str, flags: &[&str]) -> Output {
        let mut args = vec!["sync", "--target", target, "--secrets", secrets];
        args.extend_from_slice(flags);
        self.run_async(&args).await
    }

    /// Shortcut for `secret-sync classify`.
    pub fn classify(&self, names: &[&str]) -> Output {
        let mut args = vec!["classify"];
        args.extend_from_slice(names);
        self.run(&args)
    }
}
