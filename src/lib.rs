//! featprobe - compile-time feature probing for C++ toolchains.
//!
//! featprobe runs small compile and link probes against the host C++
//! toolchain and writes an include-guarded header of `HAVE_*` macros
//! describing what succeeded.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Probe manifest loading
//! - [`error`] - Error types and result aliases
//! - [`header`] - Generated header emission
//! - [`orchestrator`] - Probe group sequencing
//! - [`probe`] - Probe declarations and macro identifiers
//! - [`registry`] - Write-once probe outcomes
//! - [`shell`] - External process execution
//! - [`synthesize`] - Probe source generation
//! - [`toolchain`] - Compiler drivers
//! - [`ui`] - Progress reporting
//!
//! # Example
//!
//! ```
//! use featprobe::probe::{MacroIdentifier, ProbeSpec};
//! use featprobe::synthesize::synthesize;
//!
//! let spec = ProbeSpec::type_alias("std::mutex", &["mutex"], "std::mutex");
//! assert_eq!(spec.macro_identifier(), MacroIdentifier::from_name("std::mutex"));
//! assert!(synthesize(&spec).contains("typedef std::mutex test_check;"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod orchestrator;
pub mod probe;
pub mod registry;
pub mod shell;
pub mod synthesize;
pub mod toolchain;
pub mod ui;

pub use error::{ProbeError, Result};
