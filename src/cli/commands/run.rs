//! Run command implementation.
//!
//! The `featprobe run` command loads the manifest, runs every probe group
//! in declaration order, and writes the header.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_manifest, Check, ProbeManifest};
use crate::error::Result;
use crate::header::{EmitOutcome, DEFAULT_GUARD};
use crate::orchestrator::{BuildOptions, ConfigBuilder};
use crate::synthesize::DEFAULT_SCRATCH_DIR;
use crate::toolchain::{select_toolchain, ToolchainConfig};
use crate::ui::ProbeReporter;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    manifest: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(manifest: &Path, args: RunArgs) -> Self {
        Self {
            manifest: manifest.to_path_buf(),
            args,
        }
    }

    /// Merge manifest settings with command-line overrides.
    ///
    /// Manifest paths are relative to the manifest's directory; override
    /// paths are used as given.
    pub fn build_options(&self, manifest: &ProbeManifest) -> BuildOptions {
        let base = self.manifest.parent().unwrap_or_else(|| Path::new(""));

        let header = self
            .args
            .output
            .clone()
            .unwrap_or_else(|| base.join(&manifest.header));
        let scratch = self.args.scratch_dir.clone().unwrap_or_else(|| {
            base.join(
                manifest
                    .scratch_dir
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_SCRATCH_DIR)),
            )
        });

        BuildOptions::new(header)
            .scratch_dir(scratch)
            .always_build(self.args.force || manifest.always_build)
            .guard(manifest.guard.as_deref().unwrap_or(DEFAULT_GUARD))
    }

    fn toolchain_config(&self) -> ToolchainConfig {
        ToolchainConfig {
            compiler: self.args.compiler.clone(),
            extra_flags: self
                .args
                .cxxflags
                .iter()
                .filter(|f| !f.is_empty())
                .cloned()
                .collect(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn ProbeReporter) -> Result<CommandResult> {
        let manifest = load_manifest(&self.manifest)?;
        let checks = manifest.to_checks()?;
        let options = self.build_options(&manifest);
        tracing::debug!(
            "Running {} probe groups for {}",
            checks.len(),
            options.header_path.display()
        );

        let toolchain = select_toolchain(&self.toolchain_config())?;
        let mut builder = ConfigBuilder::new(options, toolchain)?;

        for check in &checks {
            match check {
                Check::Alternatives(group) => builder.run(group, ui)?,
                Check::Paired(group) => builder.run_paired_or_exit(group, ui)?,
            };
        }
        for m in &manifest.macros {
            builder.add_macro(&m.name, &m.value);
        }
        for code in &manifest.macro_code {
            builder.add_macro_code(code);
        }

        match builder.finalize()? {
            EmitOutcome::Written { defined } => tracing::debug!(
                "Wrote {} ({} of {} features found)",
                builder.header_path().display(),
                defined.len(),
                builder.registry().outcomes().len()
            ),
            EmitOutcome::Skipped => {
                tracing::debug!("{} is up to date", builder.header_path().display())
            }
        }

        Ok(CommandResult::success())
    }
}
