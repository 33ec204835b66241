use std::fs;
use std::path::Path;
use std::process::Command;

use url::Url;

use crate::error::{Error, Result};

/// Marker used in messages when no ref was requested.
pub const DEFAULT_BRANCH: &str = "<default branch>";

/// Clone a repository at a specific ref using shallow clone
///
/// `ref_name` of `None` checks out the remote's default branch.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone_shallow(url: &str, ref_name: Option<&str>, target_dir: &Path) -> Result<()> {
    let display_ref = ref_name.unwrap_or(DEFAULT_BRANCH);
    let clone_err = |message: String| Error::GitClone {
        url: url.to_string(),
        r#ref: display_ref.to_string(),
        message,
    };

    // Remove target directory if it exists (git won't clone into existing non-empty dir)
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut command = Command::new("git");
    command.args(["clone", "--depth=1"]);
    if let Some(ref_name) = ref_name {
        command.args(["--branch", ref_name]);
    }
    let output = command
        .arg(url)
        .arg(target_dir)
        .output()
        .map_err(|e| clone_err(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                - Personal access token set up\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.trim().to_string()
        };

        return Err(clone_err(message));
    }

    Ok(())
}

/// Derive the directory name of a clone from its locator
///
/// The last path segment of the locator, without a `.git` suffix. Handles
/// URLs (`https://host/org/repo.git`, `file:///tmp/repo`), scp-style
/// locators (`git@host:org/repo.git`) and plain paths.
pub fn repository_name(source: &str) -> Option<String> {
    let path = match Url::parse(source) {
        Ok(url) if url.scheme().len() > 1 => url.path().to_string(),
        // Windows drive letters and scp-style locators parse as odd URLs or not at all
        _ => source.rsplit_once(':').map_or(source, |(_, path)| path).to_string(),
    };

    let segment = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
