//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::ui::ProbeReporter;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn ProbeReporter) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    manifest: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher reading the given manifest.
    pub fn new(manifest: PathBuf) -> Self {
        Self { manifest }
    }

    /// Get the manifest path.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn ProbeReporter) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(&self.manifest, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(&self.manifest, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(&self.manifest, RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockReporter;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn dispatcher_routes_list() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("probes.yml");
        fs::write(&manifest, "checks:\n  - kind: header\n    candidates: [thread]\n").unwrap();

        let cli = Cli::try_parse_from(["featprobe", "list"]).unwrap();
        let dispatcher = CommandDispatcher::new(manifest.clone());
        let mut ui = MockReporter::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(dispatcher.manifest(), manifest.as_path());
        assert!(ui.messages().iter().any(|m| m.contains("HAVE_THREAD")));
    }

    #[test]
    fn dispatcher_defaults_to_run() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("missing.yml");

        let cli = Cli::try_parse_from(["featprobe"]).unwrap();
        let dispatcher = CommandDispatcher::new(manifest);
        let mut ui = MockReporter::new();

        let result = dispatcher.dispatch(&cli, &mut ui);
        assert!(matches!(
            result,
            Err(crate::error::ProbeError::ManifestNotFound { .. })
        ));
    }
}
