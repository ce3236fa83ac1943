//! Windows toolchain (cl.exe / link.exe).
//!
//! Compiles always use a fixed debug flag set. Library probes compile the
//! probe object first and then run the separate linker against it.
//!
//! Quirk: `cl.exe` sometimes exits non-zero while
//! still producing a usable object file. A failed compile whose expected
//! `.obj` exists is reported as a success. This applies to compile-only
//! probes on this toolchain and nowhere else.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{resolve_link_target, source_arg, Toolchain};
use crate::error::Result;
use crate::shell::{run, CommandOptions};

/// Default compiler executable.
pub const DEFAULT_COMPILER: &str = "cl.exe";

/// Default linker executable.
pub const DEFAULT_LINKER: &str = "link.exe";

/// Flags used for every compile: debug info, no optimization, static debug
/// runtime, synchronous C++ exceptions, warning level 3.
pub const CL_OPTIONS: &[&str] = &[
    "/ZI",
    "/nologo",
    "/W3",
    "/WX-",
    "/Od",
    "/Oy-",
    "/D",
    "DEBUG",
    "/D",
    "NOMINMAX",
    "/D",
    "_MBCS",
    "/D",
    "PLATFORM_WIN32",
    "/Gm",
    "/EHsc",
    "/RTC1",
    "/MTd",
    "/GS",
    "/fp:precise",
    "/Zc:wchar_t",
    "/Zc:forScope",
    "/Gd",
    "/analyze-",
    "/errorReport:queue",
];

const ARTIFACT_EXTENSIONS: &[&str] = &["obj", "pdb", "idb", "ilk", "exe"];

/// The MSVC compiler and linker pair.
#[derive(Debug, Clone)]
pub struct MsvcToolchain {
    compiler: String,
    linker: String,
}

impl Default for MsvcToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER, DEFAULT_LINKER)
    }
}

impl MsvcToolchain {
    /// Use the given compiler and linker executables.
    pub fn new(compiler: impl Into<String>, linker: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            linker: linker.into(),
        }
    }

    fn compile(&self, source: &Path, workdir: &Path, stem: &str) -> Result<bool> {
        let mut args: Vec<OsString> = CL_OPTIONS.iter().map(OsString::from).collect();
        args.push("/c".into());
        args.push(format!("/Fo{stem}.obj").into());
        args.push(format!("/Fd{stem}.pdb").into());
        args.push(source_arg(source));

        let result = run(&self.compiler, &args, &CommandOptions::in_dir(workdir))?;
        if result.success {
            return Ok(true);
        }

        let object = object_path(workdir, stem);
        if object.is_file() {
            tracing::warn!(
                "{} exited with {:?} but produced {}; treating as success",
                self.compiler,
                result.exit_code,
                object.display()
            );
            return Ok(true);
        }

        Ok(false)
    }
}

fn object_path(workdir: &Path, stem: &str) -> PathBuf {
    workdir.join(format!("{stem}.obj"))
}

impl Toolchain for MsvcToolchain {
    fn name(&self) -> &str {
        &self.compiler
    }

    fn compile_only(&self, source: &Path, workdir: &Path, stem: &str) -> Result<bool> {
        self.compile(source, workdir, stem)
    }

    fn link(&self, source: &Path, workdir: &Path, stem: &str, target: &str) -> Result<bool> {
        if !self.compile(source, workdir, stem)? {
            return Ok(false);
        }

        let args: Vec<OsString> = vec![
            "/nologo".into(),
            resolve_link_target(target)?,
            format!("{stem}.obj").into(),
            format!("/OUT:{stem}.exe").into(),
        ];

        let result = run(&self.linker, &args, &CommandOptions::in_dir(workdir))?;
        Ok(result.success)
    }

    fn artifacts(&self, workdir: &Path, stem: &str) -> Vec<PathBuf> {
        ARTIFACT_EXTENSIONS
            .iter()
            .map(|ext| workdir.join(format!("{stem}.{ext}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cl_and_link() {
        let toolchain = MsvcToolchain::default();
        assert_eq!(toolchain.name(), "cl.exe");
        assert_eq!(toolchain.linker, "link.exe");
    }

    #[test]
    fn options_disable_optimization_and_use_debug_runtime() {
        assert!(CL_OPTIONS.contains(&"/Od"));
        assert!(CL_OPTIONS.contains(&"/MTd"));
        assert!(CL_OPTIONS.contains(&"/EHsc"));
        assert!(CL_OPTIONS.contains(&"/W3"));
    }

    #[test]
    fn artifacts_are_stem_scoped() {
        let toolchain = MsvcToolchain::default();
        let artifacts = toolchain.artifacts(Path::new("scratch"), "heapalloc");
        assert!(artifacts.contains(&Path::new("scratch").join("heapalloc.obj")));
        assert!(artifacts.contains(&Path::new("scratch").join("heapalloc.pdb")));
        assert!(artifacts
            .iter()
            .all(|p| p.file_stem().and_then(|s| s.to_str()) == Some("heapalloc")));
    }

    #[test]
    fn no_library_retry_directories() {
        assert!(MsvcToolchain::default().library_search_dirs().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn failed_compile_with_object_counts_as_success() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("probe.cc");
        std::fs::write(&source, "").unwrap();
        std::fs::write(temp.path().join("probe.obj"), "").unwrap();

        let toolchain = MsvcToolchain::new("false", "false");
        assert!(toolchain.compile_only(&source, temp.path(), "probe").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn failed_compile_without_object_is_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("probe.cc");
        std::fs::write(&source, "").unwrap();

        let toolchain = MsvcToolchain::new("false", "false");
        assert!(!toolchain.compile_only(&source, temp.path(), "probe").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn link_runs_linker_after_compile() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("probe.cc");
        std::fs::write(&source, "").unwrap();

        let links = MsvcToolchain::new("true", "true");
        assert!(links.link(&source, temp.path(), "probe", "kernel32.lib").unwrap());

        let link_fails = MsvcToolchain::new("true", "false");
        assert!(!link_fails.link(&source, temp.path(), "probe", "kernel32.lib").unwrap());
    }
}
