//! # Error Handling
//!
//! This module defines the centralized error type for the extension
//! assembler. It uses the `thiserror` library to describe every failure mode
//! of an aggregation run with enough context to act on it.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering descriptor parsing, repository
//!   cloning, manifest lookup and parsing, workspace linking and lock
//!   poisoning, plus wrapped I/O, YAML and JSON errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! No variant is retried anywhere in the library. Every error produced by a
//! pipeline aborts the whole aggregation run and surfaces to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for extension assembly operations
#[derive(Error, Debug)]
pub enum Error {
    /// The extension descriptor file could not be parsed.
    #[error("Descriptor parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    DescriptorParse {
        message: String,
        /// Optional hint for how to fix the descriptor file
        hint: Option<String>,
    },

    /// An error occurred while cloning an extension repository.
    ///
    /// Includes the repository locator, the requested ref (or the default
    /// branch marker) and the git error output.
    #[error("Git clone error for {url}@{r#ref}: {message}")]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
    },

    /// A manifest, or a field the assembler needs from it, is missing.
    #[error("Manifest not found: {}: {message}", path.display())]
    ManifestNotFound { path: PathBuf, message: String },

    /// A manifest exists but could not be read as a package manifest.
    #[error("Manifest parsing error: {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// A workspace link could not be created.
    #[error("Link error: {} -> {}: {message}", link.display(), target.display())]
    Link {
        link: PathBuf,
        target: PathBuf,
        message: String,
    },

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
