//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_host("1.2.3", &[("rimraf", "5.6.7")]);
//!     fixture.command().arg("clean").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, GitRepo};
    pub use super::TestFixture;
}

/// Whether a `git` binary is available; tests that clone skip themselves
/// otherwise.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A local git repository standing in for an extension's remote.
pub struct GitRepo {
    _temp_dir: assert_fs::TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Creates a repository named `name` with one commit holding `files` on
    /// branch `main`.
    pub fn new(name: &str, files: &[(&str, &str)]) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let repo = temp_dir.child(name);
        repo.create_dir_all().expect("Failed to create repository dir");
        git(repo.path(), &["init", "--quiet", "--initial-branch=main"]);
        git(repo.path(), &["config", "user.email", "test@example.com"]);
        git(repo.path(), &["config", "user.name", "Test"]);
        let this = Self {
            path: repo.path().to_path_buf(),
            _temp_dir: temp_dir,
        };
        this.commit(files, "initial");
        this
    }

    /// Commits `files` on the current branch.
    pub fn commit(&self, files: &[(&str, &str)], message: &str) {
        for (path, content) in files {
            assert_fs::fixture::ChildPath::new(self.path.join(path))
                .write_str(content)
                .expect("Failed to write repository file");
        }
        git(self.path(), &["add", "--all"]);
        git(self.path(), &["commit", "--quiet", "-m", message]);
    }

    /// Creates `branch` from the current commit and commits `files` on it,
    /// then switches back to `main`.
    pub fn branch(&self, branch: &str, files: &[(&str, &str)]) {
        git(self.path(), &["checkout", "--quiet", "-b", branch]);
        self.commit(files, branch);
        git(self.path(), &["checkout", "--quiet", "main"]);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` locator suitable for an extension descriptor.
    pub fn url(&self) -> String {
        format!("file://{}", self.path().display())
    }
}

/// A host framework checkout in a temporary directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes the host manifest with `version` and the given development
    /// dependencies.
    pub fn with_host(self, version: &str, dev_dependencies: &[(&str, &str)]) -> Self {
        let dev: serde_json::Map<String, serde_json::Value> = dev_dependencies
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        let manifest = serde_json::json!({
            "private": true,
            "version": version,
            "devDependencies": dev,
        });
        self.with_file(
            "package.json",
            &serde_json::to_string_pretty(&manifest).expect("Failed to serialize host manifest"),
        )
    }

    /// Writes an assembly manifest with no dependencies.
    pub fn with_assembly(self) -> Self {
        self.with_file(
            "examples/assembly/package.json",
            r#"{"private": true, "name": "@eclipse-che/theia-assembly", "dependencies": {}}"#,
        )
    }

    /// Writes `extensions.yml` with the given content.
    pub fn with_descriptors(self, content: &str) -> Self {
        self.with_file("extensions.yml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Parsed JSON content of a file below the fixture root.
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.path().join(path)).expect("Failed to read JSON file");
        serde_json::from_str(&content).expect("Invalid JSON")
    }

    /// A command for the binary, rooted at this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("extension-assembler");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
