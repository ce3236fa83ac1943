//! Terminal reporter.

use std::io::Write;

use super::{OutputMode, ProbeReporter, ProbeTheme};

/// Writes `checking for X... yes|no` lines to stdout and errors to stderr.
#[derive(Debug)]
pub struct TerminalReporter {
    mode: OutputMode,
    theme: ProbeTheme,
    line_open: bool,
}

impl TerminalReporter {
    /// Create a reporter.
    pub fn new(mode: OutputMode, theme: ProbeTheme) -> Self {
        Self {
            mode,
            theme,
            line_open: false,
        }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn close_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

impl ProbeReporter for TerminalReporter {
    fn checking(&mut self, name: &str) {
        if !self.mode.shows_progress() {
            return;
        }
        self.close_line();
        print!("{}", self.theme.format_checking(name));
        let _ = std::io::stdout().flush();
        self.line_open = true;
    }

    fn result(&mut self, found: bool) {
        if !self.mode.shows_progress() {
            return;
        }
        println!("{}", self.theme.format_verdict(found));
        self.line_open = false;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            self.close_line();
            println!("{}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        self.close_line();
        eprintln!("{}", self.theme.format_error(msg));
    }
}
