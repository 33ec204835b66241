//! # Configuration Schema and Parsing
//!
//! This module defines the extension descriptor file and the settings that
//! shape an aggregation run.
//!
//! ## Key Components
//!
//! - **`ExtensionDescriptor`**: One extension to assemble: where to fetch it
//!   from, which ref to check out and which folders of it to link.
//!
//! - **`Layout`**: The on-disk locations an aggregation run reads and writes
//!   (host root, packages workspace, checkout directory, assembly directory).
//!
//! - **`Settings`**: Host version and the naming prefixes used by the
//!   resolver and the linker.
//!
//! ## Parsing
//!
//! The `parse` function accepts two formats:
//!
//! 1.  **Current Format**: a mapping with an `extensions:` sequence.
//!
//!     ```yaml
//!     extensions:
//!       - source: https://github.com/org/repo.git
//!         ref: main
//!         folders: [plugin-a, plugin-b]
//!     ```
//!
//! 2.  **Bare Format**: the sequence of descriptors on its own.
//!
//! The parser first attempts the current format and falls back to the bare
//! one. Each descriptor is validated after parsing.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// An extension to fetch, link and merge into the assembly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionDescriptor {
    /// Repository locator, e.g. `https://host/org/repo.git` or `file:///path`.
    pub source: String,
    /// Branch or tag to check out. `None` selects the remote's default branch.
    #[serde(default, alias = "checkoutTo")]
    pub r#ref: Option<String>,
    /// Folders of the repository to link, relative to its root. Empty means
    /// the whole repository is a single package.
    #[serde(default)]
    pub folders: Vec<String>,
}

impl ExtensionDescriptor {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            r#ref: None,
            folders: Vec::new(),
        }
    }

    pub fn with_ref(mut self, r#ref: impl Into<String>) -> Self {
        self.r#ref = Some(r#ref.into());
        self
    }

    pub fn with_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders = folders.into_iter().map(Into::into).collect();
        self
    }

    /// The ref to check out, or `None` for the default branch. An empty ref
    /// in the descriptor file also means the default branch.
    pub fn ref_name(&self) -> Option<&str> {
        self.r#ref.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Check the descriptor for values no pipeline could act on.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::DescriptorParse {
                message: "extension has an empty 'source'".to_string(),
                hint: Some("Set 'source' to a repository URL".to_string()),
            });
        }

        for folder in &self.folders {
            let path = Path::new(folder);
            let escapes = path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
            if folder.trim().is_empty() || escapes {
                return Err(Error::DescriptorParse {
                    message: format!(
                        "folder '{}' of extension '{}' is not a relative path inside the repository",
                        folder, self.source
                    ),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    extensions: Vec<ExtensionDescriptor>,
}

/// Parses the descriptor file content into the list of extensions.
pub fn parse(yaml_content: &str) -> Result<Vec<ExtensionDescriptor>> {
    let descriptors = match serde_yaml::from_str::<DescriptorFile>(yaml_content) {
        Ok(file) => file.extensions,
        Err(current_err) => serde_yaml::from_str::<Vec<ExtensionDescriptor>>(yaml_content)
            .map_err(|_| Error::DescriptorParse {
                message: current_err.to_string(),
                hint: Some("List entries under a top-level 'extensions:' key".to_string()),
            })?,
    };

    for descriptor in &descriptors {
        descriptor.validate()?;
    }
    check_unique_clone_names(&descriptors)?;

    Ok(descriptors)
}

/// Rejects descriptor lists in which two extensions would be cloned into the
/// same checkout directory.
///
/// Each extension is cloned into `<checkout_dir>/<repository name>`, and that
/// directory belongs to one pipeline. List a repository once with all the
/// folders to link instead of once per folder.
pub fn check_unique_clone_names(descriptors: &[ExtensionDescriptor]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for descriptor in descriptors {
        let Some(name) = crate::git::repository_name(&descriptor.source) else {
            continue;
        };
        if let Some(previous) = seen.insert(name.clone(), descriptor.source.as_str()) {
            return Err(Error::DescriptorParse {
                message: format!(
                    "extensions '{}' and '{}' would both be cloned into '{}'",
                    previous, descriptor.source, name
                ),
                hint: Some(
                    "List each repository once, with all of its folders under 'folders:'"
                        .to_string(),
                ),
            });
        }
    }
    Ok(())
}

/// Parse the descriptor list from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ExtensionDescriptor>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// On-disk locations of an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Root of the host framework checkout; holds the host manifest.
    pub host_root: PathBuf,
    /// Shared packages workspace receiving the extension links.
    pub packages_dir: PathBuf,
    /// Parent directory of every extension clone.
    pub checkout_dir: PathBuf,
    /// Directory holding the assembly manifest.
    pub assembly_dir: PathBuf,
}

impl Layout {
    /// The conventional layout below a host root.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            host_root: root.to_path_buf(),
            packages_dir: root.join(defaults::PACKAGES_DIR),
            checkout_dir: root.join(defaults::CHECKOUT_DIR),
            assembly_dir: root.join(defaults::ASSEMBLY_DIR),
        }
    }

    pub fn host_manifest(&self) -> PathBuf {
        self.host_root.join(defaults::MANIFEST_FILE)
    }

    pub fn host_core_manifest(&self) -> PathBuf {
        self.host_root.join(defaults::HOST_CORE_MANIFEST)
    }

    pub fn assembly_manifest(&self) -> PathBuf {
        self.assembly_dir.join(defaults::MANIFEST_FILE)
    }

    pub fn node_modules_dir(&self) -> PathBuf {
        self.host_root.join(defaults::NODE_MODULES_DIR)
    }
}

/// Naming and version settings shared by every pipeline of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Version of the host framework; host dependencies are pinned to `^<host_version>`.
    pub host_version: String,
    /// Package namespace of the host framework, e.g. `@theia/`.
    pub namespace_prefix: String,
    /// Prefix of every workspace link name.
    pub link_prefix: String,
}

impl Settings {
    pub fn new(host_version: impl Into<String>) -> Self {
        Self {
            host_version: host_version.into(),
            namespace_prefix: defaults::HOST_NAMESPACE_PREFIX.to_string(),
            link_prefix: defaults::LINK_PREFIX.to_string(),
        }
    }

    pub fn with_namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = prefix.into();
        self
    }

    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }
}
