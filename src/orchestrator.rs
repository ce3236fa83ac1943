//! Probe orchestration.
//!
//! [`ConfigBuilder`] is the entry point: it owns the registry, the scratch
//! directory, and the selected toolchain, runs probe groups in the order
//! the caller declares them, and finally writes the header.
//!
//! # Example
//!
//! ```no_run
//! use featprobe::orchestrator::{BuildOptions, ConfigBuilder};
//! use featprobe::probe::{ProbeGroup, ProbeSpec};
//! use featprobe::toolchain::{select_toolchain, ToolchainConfig};
//! use featprobe::ui::{create_reporter, OutputMode};
//!
//! # fn main() -> featprobe::Result<()> {
//! let toolchain = select_toolchain(&ToolchainConfig::default())?;
//! let options = BuildOptions::new("src/config.h").always_build(true);
//! let mut builder = ConfigBuilder::new(options, toolchain)?;
//! let mut ui = create_reporter(OutputMode::Normal, false);
//!
//! builder.run_mandatory_or_exit(
//!     &ProbeGroup::headers(true, &["thread"], "thread required.")?,
//!     ui.as_mut(),
//! )?;
//! builder.run_optional(
//!     &ProbeGroup::code(
//!         false,
//!         vec![ProbeSpec::function("mmap", &["sys/mman.h"], "mmap")],
//!         "",
//!     )?,
//!     ui.as_mut(),
//! )?;
//! builder.finalize()?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{ProbeError, Result};
use crate::header::{EmitOutcome, HeaderEmitter, DEFAULT_GUARD};
use crate::probe::{PairedGroup, ProbeGroup, ProbeSpec};
use crate::registry::{GroupResult, ResultRegistry};
use crate::synthesize::{write_probe_source, ScratchDir, DEFAULT_SCRATCH_DIR};
use crate::toolchain::{invoke, Toolchain};
use crate::ui::ProbeReporter;

/// Exit status used when a mandatory group fails.
pub const MANDATORY_FAILURE_EXIT_CODE: i32 = 1;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Where the generated header is written.
    pub header_path: PathBuf,

    /// Where probe sources and artifacts live.
    pub scratch_dir: PathBuf,

    /// Re-run probes and rewrite the header even if it exists.
    pub always_build: bool,

    /// Include-guard macro for the header.
    pub guard: String,
}

impl BuildOptions {
    /// Defaults for writing `header_path`.
    pub fn new(header_path: impl Into<PathBuf>) -> Self {
        Self {
            header_path: header_path.into(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            always_build: false,
            guard: DEFAULT_GUARD.to_string(),
        }
    }

    /// Set the scratch directory.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Force probes and header rewrite.
    pub fn always_build(mut self, always: bool) -> Self {
        self.always_build = always;
        self
    }

    /// Set the include guard.
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }
}

/// What running a group produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// A variant succeeded.
    Satisfied { variant: String },
    /// No variant succeeded and the group was optional.
    Unsatisfied,
    /// The header is current; probes were not run.
    UpToDate,
}

impl From<GroupResult> for GroupOutcome {
    fn from(result: GroupResult) -> Self {
        match result.winning_variant {
            Some(variant) if result.succeeded => GroupOutcome::Satisfied { variant },
            _ => GroupOutcome::Unsatisfied,
        }
    }
}

impl GroupOutcome {
    /// Whether the group was satisfied by a probe in this run.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, GroupOutcome::Satisfied { .. })
    }
}

/// Sequences probe groups and emits the generated header.
pub struct ConfigBuilder {
    options: BuildOptions,
    toolchain: Box<dyn Toolchain>,
    scratch: ScratchDir,
    registry: ResultRegistry,
    emitter: HeaderEmitter,
    up_to_date: bool,
}

impl ConfigBuilder {
    /// Prepare a run, creating the scratch directory.
    pub fn new(options: BuildOptions, toolchain: Box<dyn Toolchain>) -> Result<Self> {
        let scratch = ScratchDir::create(&options.scratch_dir)?;
        let up_to_date = options.header_path.is_file() && !options.always_build;
        if up_to_date {
            tracing::debug!(
                "{} exists and rebuild not forced; probes will be skipped",
                options.header_path.display()
            );
        }

        Ok(Self {
            emitter: HeaderEmitter::new(options.guard.clone()),
            options,
            toolchain,
            scratch,
            registry: ResultRegistry::new(),
            up_to_date,
        })
    }

    /// Whether the existing header will be kept and probes skipped.
    pub fn is_up_to_date(&self) -> bool {
        self.up_to_date
    }

    /// Path of the generated header.
    pub fn header_path(&self) -> &Path {
        &self.options.header_path
    }

    /// Outcomes recorded so far.
    pub fn registry(&self) -> &ResultRegistry {
        &self.registry
    }

    /// Run a group, applying its own mandatory flag without exiting.
    ///
    /// A mandatory group with no successful variant returns
    /// [`ProbeError::MandatoryGroupFailed`].
    pub fn run_group(
        &mut self,
        group: &ProbeGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        if group.is_mandatory() {
            self.run_mandatory(group, ui)
        } else {
            self.run_optional(group, ui)
        }
    }

    /// Run a group, exiting the process if it is mandatory and fails.
    pub fn run(&mut self, group: &ProbeGroup, ui: &mut dyn ProbeReporter) -> Result<GroupOutcome> {
        if group.is_mandatory() {
            self.run_mandatory_or_exit(group, ui)
        } else {
            self.run_optional(group, ui)
        }
    }

    /// Run a group that must succeed.
    ///
    /// If no variant succeeds, prints the group's failure message and
    /// terminates the process with a non-zero status. No header is written.
    pub fn run_mandatory_or_exit(
        &mut self,
        group: &ProbeGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        let result = self.run_mandatory(group, ui);
        exit_on_mandatory_failure(result, ui)
    }

    /// Run a group that must succeed, returning an error instead of exiting.
    pub fn run_mandatory(
        &mut self,
        group: &ProbeGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        match self.evaluate(group, ui)? {
            GroupOutcome::Unsatisfied => Err(mandatory_failure(
                group.name(),
                group.failure_message(),
            )),
            outcome => Ok(outcome),
        }
    }

    /// Run header/library pairs, applying the group's mandatory flag
    /// without exiting.
    ///
    /// A mandatory group with no complete pair returns
    /// [`ProbeError::MandatoryGroupFailed`].
    pub fn run_paired(
        &mut self,
        group: &PairedGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        if self.up_to_date {
            return Ok(GroupOutcome::UpToDate);
        }

        let toolchain = self.toolchain.as_ref();
        let scratch = &self.scratch;
        let result = self
            .registry
            .evaluate_pairs(group, |spec| run_probe(toolchain, scratch, spec, &mut *ui))?;

        match GroupOutcome::from(result) {
            GroupOutcome::Unsatisfied if group.is_mandatory() => Err(mandatory_failure(
                group.name(),
                group.failure_message(),
            )),
            outcome => Ok(outcome),
        }
    }

    /// Run header/library pairs, exiting the process if the group is
    /// mandatory and no pair succeeds.
    pub fn run_paired_or_exit(
        &mut self,
        group: &PairedGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        let result = self.run_paired(group, ui);
        exit_on_mandatory_failure(result, ui)
    }

    /// Run a group whose failure is recorded and tolerated.
    pub fn run_optional(
        &mut self,
        group: &ProbeGroup,
        ui: &mut dyn ProbeReporter,
    ) -> Result<GroupOutcome> {
        self.evaluate(group, ui)
    }

    /// Define `name` as `value` in the header.
    pub fn add_macro(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.registry.add_macro(name, value);
    }

    /// Append a verbatim code fragment to the header.
    pub fn add_macro_code(&mut self, code: impl Into<String>) {
        self.registry.add_macro_code(code);
    }

    /// Write the header unless it exists and rebuilding is not forced.
    pub fn finalize(&self) -> Result<EmitOutcome> {
        self.emitter.emit(
            &self.options.header_path,
            &self.registry,
            self.options.always_build,
        )
    }

    fn evaluate(&mut self, group: &ProbeGroup, ui: &mut dyn ProbeReporter) -> Result<GroupOutcome> {
        if self.up_to_date {
            return Ok(GroupOutcome::UpToDate);
        }

        let toolchain = self.toolchain.as_ref();
        let scratch = &self.scratch;
        let result = self
            .registry
            .evaluate_group(group, |spec| run_probe(toolchain, scratch, spec, &mut *ui))?;

        Ok(GroupOutcome::from(result))
    }
}

fn run_probe(
    toolchain: &dyn Toolchain,
    scratch: &ScratchDir,
    spec: &ProbeSpec,
    ui: &mut dyn ProbeReporter,
) -> Result<bool> {
    ui.checking(spec.identifier());

    let source = write_probe_source(scratch, spec)?;
    let stem = spec.macro_identifier().stem();
    let found = invoke(toolchain, scratch.path(), &source, &stem, spec.link_target())?;

    ui.result(found);
    Ok(found)
}

fn mandatory_failure(name: &str, message: &str) -> ProbeError {
    let message = if message.is_empty() {
        format!("{} is required.", name)
    } else {
        message.to_string()
    };
    ProbeError::MandatoryGroupFailed {
        group: name.to_string(),
        message,
    }
}

fn exit_on_mandatory_failure(
    result: Result<GroupOutcome>,
    ui: &mut dyn ProbeReporter,
) -> Result<GroupOutcome> {
    match result {
        Err(ProbeError::MandatoryGroupFailed { message, .. }) => {
            ui.error(&message);
            std::process::exit(MANDATORY_FAILURE_EXIT_CODE);
        }
        other => other,
    }
}
