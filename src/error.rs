//! Error types for feature probing.
//!
//! This module defines [`ProbeError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A probe that fails to compile or link is *not* an error. It is
//!   recorded as a failed outcome in the registry.
//! - Malformed probe declarations and impossible toolchain selections are
//!   configuration errors and surface immediately.
//! - A toolchain that cannot be spawned at all is reported as
//!   [`ProbeError::ToolchainSpawn`], never as a missing feature.
//! - Exhausting a mandatory group surfaces as
//!   [`ProbeError::MandatoryGroupFailed`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for probing operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A probe declaration is inconsistent with its kind.
    #[error("Invalid probe '{name}': {message}")]
    InvalidProbe { name: String, message: String },

    /// No usable toolchain could be selected.
    #[error("Toolchain selection failed: {message}")]
    ToolchainSelection { message: String },

    /// The compiler or linker process could not be started.
    #[error("Failed to run toolchain '{program}': {source}")]
    ToolchainSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Every variant of a mandatory group failed.
    #[error("{message}")]
    MandatoryGroupFailed { group: String, message: String },

    /// Probe manifest not found at expected location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse the probe manifest.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Manifest parsed but describes something impossible.
    #[error("Invalid manifest: {message}")]
    ManifestInvalid { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for probing operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
