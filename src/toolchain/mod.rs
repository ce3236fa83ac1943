//! Toolchain selection and invocation.
//!
//! A [`Toolchain`] knows how to compile a probe without linking, how to
//! link it against a library, and which artifacts it leaves behind. Two
//! implementations exist: [`UnixToolchain`] for `cc`-style drivers and
//! [`MsvcToolchain`] for `cl.exe`/`link.exe`. One is chosen at startup by
//! [`select_toolchain`] and used for the whole run.
//!
//! [`invoke`] runs one probe: it compiles (or links, for library probes),
//! retries library links against [`Toolchain::library_search_dirs`], and
//! removes artifacts on every exit path. A non-zero exit is "feature
//! absent"; only a failure to spawn the toolchain is an error.

pub mod artifacts;
pub mod lookup;
pub mod msvc;
pub mod unix;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ProbeError, Result};

pub use artifacts::{remove_artifacts, ArtifactGuard};
pub use msvc::MsvcToolchain;
pub use unix::UnixToolchain;

/// Compiler used when no alternate compiler is detected.
pub const DEFAULT_UNIX_COMPILER: &str = "g++";

/// Preferred compiler when present on PATH.
pub const PREFERRED_UNIX_COMPILER: &str = "clang++";

/// Operations a platform toolchain provides to the invoker.
pub trait Toolchain {
    /// Executable name used in messages.
    fn name(&self) -> &str;

    /// Compile `source` without linking, from inside `workdir`.
    ///
    /// Returns whether the probe compiled.
    fn compile_only(&self, source: &Path, workdir: &Path, stem: &str) -> Result<bool>;

    /// Build `source` into a program linked against `target`.
    ///
    /// Returns whether the link succeeded.
    fn link(&self, source: &Path, workdir: &Path, stem: &str, target: &str) -> Result<bool>;

    /// Files a compile or link for `stem` may leave in `workdir`.
    fn artifacts(&self, workdir: &Path, stem: &str) -> Vec<PathBuf>;

    /// Directories tried, in order, when linking a bare library name fails.
    fn library_search_dirs(&self) -> &[PathBuf] {
        &[]
    }

    /// Delete everything [`Toolchain::artifacts`] names.
    fn cleanup_artifacts(&self, workdir: &Path, stem: &str) {
        remove_artifacts(self, workdir, stem);
    }
}

/// How to pick the toolchain.
#[derive(Debug, Clone, Default)]
pub struct ToolchainConfig {
    /// Compiler executable, overriding detection.
    pub compiler: Option<String>,

    /// Extra flags for Unix-like compilers.
    pub extra_flags: Vec<String>,
}

/// Select the toolchain for this platform.
///
/// On Windows this is always [`MsvcToolchain`] (with the compiler
/// overridable). Elsewhere an explicit compiler wins; otherwise
/// `clang++` with C++11 flags is preferred when found on PATH, falling
/// back to `g++`.
pub fn select_toolchain(config: &ToolchainConfig) -> Result<Box<dyn Toolchain>> {
    if let Some(compiler) = &config.compiler {
        if compiler.trim().is_empty() {
            return Err(ProbeError::ToolchainSelection {
                message: "compiler override is empty".to_string(),
            });
        }
    }

    let toolchain: Box<dyn Toolchain> = if cfg!(windows) {
        let compiler = config
            .compiler
            .clone()
            .unwrap_or_else(|| msvc::DEFAULT_COMPILER.to_string());
        Box::new(MsvcToolchain::new(compiler, msvc::DEFAULT_LINKER))
    } else {
        Box::new(select_unix(config, lookup::on_path(PREFERRED_UNIX_COMPILER)))
    };

    tracing::debug!("Selected toolchain {}", toolchain.name());
    Ok(toolchain)
}

fn select_unix(config: &ToolchainConfig, preferred_available: bool) -> UnixToolchain {
    let (compiler, mut flags) = match &config.compiler {
        Some(compiler) => (compiler.clone(), Vec::new()),
        None if preferred_available => (PREFERRED_UNIX_COMPILER.to_string(), modern_flags()),
        None => (DEFAULT_UNIX_COMPILER.to_string(), Vec::new()),
    };
    flags.extend(config.extra_flags.iter().cloned());
    UnixToolchain::new(compiler, flags)
}

fn modern_flags() -> Vec<String> {
    let mut flags = vec!["-std=c++11".to_string()];
    if cfg!(target_os = "macos") {
        flags.push("-stdlib=libc++".to_string());
    }
    flags
}

/// Run one probe through `toolchain`.
///
/// `link_target` selects a library check. Artifacts for `stem` are
/// removed before the toolchain runs and again before this returns,
/// whatever the outcome, so leftovers from an interrupted run never count
/// as evidence.
pub fn invoke(
    toolchain: &dyn Toolchain,
    workdir: &Path,
    source: &Path,
    stem: &str,
    link_target: Option<&str>,
) -> Result<bool> {
    toolchain.cleanup_artifacts(workdir, stem);
    let _guard = ArtifactGuard::new(toolchain, workdir, stem);

    match link_target {
        None => toolchain.compile_only(source, workdir, stem),
        Some(target) => link_library(toolchain, workdir, source, stem, target),
    }
}

fn link_library(
    toolchain: &dyn Toolchain,
    workdir: &Path,
    source: &Path,
    stem: &str,
    target: &str,
) -> Result<bool> {
    if toolchain.link(source, workdir, stem, target)? {
        return Ok(true);
    }

    if Path::new(target).is_absolute() {
        return Ok(false);
    }

    for dir in toolchain.library_search_dirs() {
        if !dir.is_dir() {
            continue;
        }
        let candidate = dir.join(target);
        tracing::debug!("Retrying link against {}", candidate.display());
        if toolchain.link(source, workdir, stem, &candidate.to_string_lossy())? {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Probe sources are passed by file name; toolchains run inside the scratch dir.
pub(crate) fn source_arg(source: &Path) -> OsString {
    source
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| source.as_os_str().to_owned())
}

/// Relative link targets with a directory component are made absolute so
/// they still resolve from inside the scratch dir. Bare names pass through.
pub(crate) fn resolve_link_target(target: &str) -> Result<OsString> {
    let path = Path::new(target);
    if path.is_relative() && path.components().count() > 1 {
        return Ok(std::path::absolute(path)?.into_os_string());
    }
    Ok(OsString::from(target))
}
