//! Workspace cleanup.
//!
//! Undoes what aggregation put on disk: the workspace links in the packages
//! directory, the extension clones, the assembly and the installed node
//! modules. Real directories inside the packages directory are the host's
//! own packages and are left alone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Layout;
use crate::error::Result;

/// What a cleanup removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub links_removed: Vec<PathBuf>,
    pub dirs_removed: Vec<PathBuf>,
}

/// Removes every symbolic link directly inside `packages_dir`.
pub fn remove_links(packages_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(packages_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_symlink() {
            let path = entry.path();
            // Directory symlinks on Windows need remove_dir
            fs::remove_file(&path).or_else(|_| fs::remove_dir(&path))?;
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

/// Removes the workspace links, the checkout and assembly directories and
/// the host's `node_modules`.
pub fn clean(layout: &Layout) -> Result<CleanReport> {
    info!("Removing symbolic links...");
    let links_removed = remove_links(&layout.packages_dir)?;

    let mut dirs_removed = Vec::new();
    for dir in [
        layout.checkout_dir.clone(),
        layout.assembly_dir.clone(),
        layout.node_modules_dir(),
    ] {
        if dir.exists() {
            info!("Removing {}...", dir.display());
            fs::remove_dir_all(&dir)?;
            dirs_removed.push(dir);
        }
    }

    Ok(CleanReport {
        links_removed,
        dirs_removed,
    })
}
