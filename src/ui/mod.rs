//! Console reporting for probe runs.
//!
//! This module provides:
//! - [`ProbeReporter`] trait for progress output
//! - [`TerminalReporter`] for interactive and CI usage
//! - [`MockReporter`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use featprobe::ui::{MockReporter, ProbeReporter};
//!
//! let mut ui = MockReporter::new();
//! ui.checking("std::mutex");
//! ui.result(true);
//! assert_eq!(ui.lines(), ["checking for std::mutex... yes"]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockReporter;
pub use output::OutputMode;
pub use terminal::TerminalReporter;
pub use theme::{should_use_colors, ProbeTheme};

/// Receives progress while probes run.
pub trait ProbeReporter {
    /// A probe for `name` is starting.
    fn checking(&mut self, name: &str);

    /// The probe started by the last [`ProbeReporter::checking`] finished.
    fn result(&mut self, found: bool);

    /// Display an informational message.
    fn message(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}

/// Create a terminal reporter for the given mode and color preference.
pub fn create_reporter(mode: OutputMode, colors: bool) -> Box<dyn ProbeReporter> {
    let theme = if colors {
        ProbeTheme::new()
    } else {
        ProbeTheme::plain()
    };
    Box::new(TerminalReporter::new(mode, theme))
}
