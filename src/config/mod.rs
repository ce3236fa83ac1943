//! Probe manifest loading and schema.
//!
//! The CLI reads a YAML manifest describing probe groups, user macros,
//! and header settings:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use featprobe::config::parse_manifest;
//! use std::path::Path;
//!
//! let manifest = parse_manifest(
//!     "checks:\n  - kind: header\n    candidates: [thread]\n",
//!     Path::new("probes.yml"),
//! )
//! .unwrap();
//! let checks = manifest.to_checks().unwrap();
//! assert_eq!(checks[0].name(), "thread");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_manifest, parse_manifest, DEFAULT_MANIFEST};
pub use schema::{
    CandidateConfig, CandidateDetail, Check, CheckConfig, CheckKind, MacroConfig, ProbeManifest,
};
