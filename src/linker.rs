//! # Workspace Linking
//!
//! Cloned extensions become workspace packages through symbolic links in the
//! shared packages directory. A link is named `<prefix><basename>` after the
//! directory it points at, so two source directories with the same basename
//! map to the same link. When that happens the link created last replaces the
//! earlier one and a warning is logged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::repository::ClonedExtension;

/// Name of the workspace link for `source_dir`, or `None` when the path has
/// no final component to name it after.
pub fn link_name(prefix: &str, source_dir: &Path) -> Option<String> {
    source_dir
        .file_name()
        .map(|base| format!("{}{}", prefix, base.to_string_lossy()))
}

/// Links the directories of `extension` into `workspace_dir`.
///
/// With folders listed in the descriptor, each folder of the clone gets its
/// own link; otherwise the clone itself is linked. The absolute link paths
/// are returned in descriptor order and recorded on the extension.
pub fn link(
    extension: &mut ClonedExtension,
    workspace_dir: &Path,
    link_prefix: &str,
) -> Result<Vec<PathBuf>> {
    let workspace_dir = std::path::absolute(workspace_dir)?;
    fs::create_dir_all(&workspace_dir).map_err(|err| Error::Link {
        link: workspace_dir.clone(),
        target: extension.cloned_dir.clone(),
        message: format!("cannot create workspace directory: {}", err),
    })?;

    let mut linked_paths = Vec::new();
    for target in extension.source_dirs()? {
        let name = link_name(link_prefix, &target).ok_or_else(|| Error::Link {
            link: workspace_dir.clone(),
            target: target.clone(),
            message: "cannot derive a link name from the target path".to_string(),
        })?;
        let link = workspace_dir.join(name);

        info!("Creating symlink from {} to {}", target.display(), link.display());
        replace_link(&target, &link)?;
        linked_paths.push(link);
    }

    extension.linked_paths = linked_paths.clone();
    Ok(linked_paths)
}

/// Points `link` at `target`, replacing whatever `link` currently is.
fn replace_link(target: &Path, link: &Path) -> Result<()> {
    let link_err = |message: String| Error::Link {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        message,
    };

    if !target.is_dir() {
        return Err(link_err("link target is not a directory".to_string()));
    }

    if let Ok(meta) = fs::symlink_metadata(link) {
        if !meta.file_type().is_symlink() {
            return Err(link_err(
                "a file or directory that is not a link is in the way".to_string(),
            ));
        }
        if let Ok(existing) = fs::read_link(link) {
            if existing != target {
                warn!(
                    "Workspace link {} pointed at {}, replacing it",
                    link.display(),
                    existing.display()
                );
            }
        }
    }

    swap_in_link(target, link).map_err(|err| link_err(err.to_string()))
}

/// Creates the link under a staging name and renames it into place, so
/// concurrent writers of the same link name never observe a missing link.
/// `link` is either absent or a symbolic link.
#[cfg(unix)]
fn swap_in_link(target: &Path, link: &Path) -> io::Result<()> {
    let staging = staging_path(link);
    std::os::unix::fs::symlink(target, &staging)?;
    fs::rename(&staging, link).inspect_err(|_| {
        let _ = fs::remove_file(&staging);
    })
}

#[cfg(windows)]
fn swap_in_link(target: &Path, link: &Path) -> io::Result<()> {
    if fs::symlink_metadata(link).is_ok_and(|meta| meta.file_type().is_symlink()) {
        fs::remove_dir(link).or_else(|_| fs::remove_file(link))?;
    }
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn staging_path(link: &Path) -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static STAGING_COUNTER: AtomicUsize = AtomicUsize::new(0);

    let name = link
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sequence = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    link.with_file_name(format!(".{}.{}-{}.link", name, std::process::id(), sequence))
}
