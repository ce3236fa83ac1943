//! Toolchain process execution.
//!
//! Programs are spawned directly (no shell) with stdout and stderr
//! captured, so probe invocations never write to the console. Only
//! stderr is kept, for trace logging. A process
//! that runs and exits non-zero is a normal [`CommandResult`]; a process
//! that cannot be started at all is [`ProbeError::ToolchainSpawn`].

use crate::error::{ProbeError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of running a toolchain command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard error.
    pub stderr: String,

    /// Whether the command exited with status zero.
    pub success: bool,
}

/// Options for running a command.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

impl CommandOptions {
    /// Run in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cwd: Some(dir.to_path_buf()),
        }
    }
}

/// Run `program` with `args` and wait for it to exit.
///
/// There is no timeout: a hung toolchain blocks the caller.
pub fn run<I, S>(program: &str, args: I, options: &CommandOptions) -> Result<CommandResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running {:?}", cmd);

    let output = cmd.output().map_err(|source| ProbeError::ToolchainSpawn {
        program: program.to_string(),
        source,
    })?;

    let result = CommandResult {
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    };

    if !result.success && !result.stderr.is_empty() {
        tracing::trace!("{} stderr:\n{}", program, result.stderr);
    }

    Ok(result)
}
