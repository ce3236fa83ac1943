//! Unix-like compiler driver (clang++ / g++).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{resolve_link_target, source_arg, Toolchain};
use crate::error::Result;
use crate::shell::{run, CommandOptions};

/// Conventional system library directories tried when a bare link fails.
pub const SYSTEM_LIBRARY_DIRS: &[&str] = &["/usr/local/lib", "/opt/local/lib", "/usr/lib", "/lib"];

/// A `cc`-style driver that compiles with `-c` and links by naming inputs.
#[derive(Debug, Clone)]
pub struct UnixToolchain {
    compiler: String,
    flags: Vec<String>,
    library_dirs: Vec<PathBuf>,
}

impl UnixToolchain {
    /// Use `compiler` with `flags` prepended to every invocation.
    pub fn new(compiler: impl Into<String>, flags: Vec<String>) -> Self {
        Self {
            compiler: compiler.into(),
            flags,
            library_dirs: SYSTEM_LIBRARY_DIRS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Replace the library directories tried on link retries.
    pub fn with_library_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.library_dirs = dirs;
        self
    }

    /// Flags passed before any inputs.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    fn base_args(&self) -> Vec<OsString> {
        self.flags.iter().map(OsString::from).collect()
    }
}

impl Toolchain for UnixToolchain {
    fn name(&self) -> &str {
        &self.compiler
    }

    fn compile_only(&self, source: &Path, workdir: &Path, stem: &str) -> Result<bool> {
        let mut args = self.base_args();
        args.push("-c".into());
        args.push(source_arg(source));
        args.push("-o".into());
        args.push(format!("{stem}.o").into());

        let result = run(&self.compiler, &args, &CommandOptions::in_dir(workdir))?;
        Ok(result.success)
    }

    fn link(&self, source: &Path, workdir: &Path, stem: &str, target: &str) -> Result<bool> {
        let mut args = self.base_args();
        args.push(source_arg(source));
        args.push(resolve_link_target(target)?);
        args.push("-o".into());
        args.push(stem.into());

        let result = run(&self.compiler, &args, &CommandOptions::in_dir(workdir))?;
        Ok(result.success)
    }

    fn artifacts(&self, workdir: &Path, stem: &str) -> Vec<PathBuf> {
        vec![
            workdir.join(format!("{stem}.o")),
            workdir.join(stem),
            workdir.join("a.out"),
        ]
    }

    fn library_search_dirs(&self) -> &[PathBuf] {
        &self.library_dirs
    }
}
