//! Manifest loading.

use crate::config::schema::ProbeManifest;
use crate::error::{ProbeError, Result};
use std::fs;
use std::path::Path;

/// Default manifest file name, resolved against the working directory.
pub const DEFAULT_MANIFEST: &str = "probes.yml";

/// Load and parse a manifest file.
///
/// Returns [`ProbeError::ManifestNotFound`] when the file is missing and
/// [`ProbeError::ManifestParse`] when it is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<ProbeManifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Parse YAML content into a [`ProbeManifest`].
///
/// `source_path` is only used for error reporting.
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<ProbeManifest> {
    if content.trim().is_empty() {
        return Ok(ProbeManifest::default());
    }
    serde_yaml::from_str(content).map_err(|e| ProbeError::ManifestParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
