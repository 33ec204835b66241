//! Default values for extension-assembler configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// File name of every package manifest the assembler reads or writes.
pub const MANIFEST_FILE: &str = "package.json";

/// Default descriptor file, relative to the host root.
pub const DESCRIPTOR_FILE: &str = "extensions.yml";

/// Prefix given to every workspace link created in the packages directory.
pub const LINK_PREFIX: &str = "@che-";

/// Package namespace of the host framework. Dependencies in this namespace
/// are pinned to a caret range on the host version.
pub const HOST_NAMESPACE_PREFIX: &str = "@theia/";

/// Shared packages workspace, relative to the host root.
pub const PACKAGES_DIR: &str = "packages";

/// Directory receiving extension clones, relative to the host root.
pub const CHECKOUT_DIR: &str = "che";

/// Directory holding the assembly manifest, relative to the host root.
pub const ASSEMBLY_DIR: &str = "examples/assembly";

/// Installed node modules, relative to the host root. Removed by `clean`.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Manifest of the host's core package, whose version is the host version.
pub const HOST_CORE_MANIFEST: &str = "packages/core/package.json";

/// Package name written into a freshly generated assembly manifest.
pub const ASSEMBLY_PACKAGE_NAME: &str = "@eclipse-che/theia-assembly";

/// Name of the host's core package inside its namespace. The generated
/// assembly depends on it.
pub const HOST_CORE_PACKAGE: &str = "core";
