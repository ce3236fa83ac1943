//! Mock reporter for testing.
//!
//! `MockReporter` implements [`ProbeReporter`] and captures every
//! completed probe line, message, and error for later assertion.

use super::ProbeReporter;

/// Captures reporter output in memory.
#[derive(Debug, Default)]
pub struct MockReporter {
    pending: Option<String>,
    lines: Vec<String>,
    messages: Vec<String>,
    errors: Vec<String>,
}

impl MockReporter {
    /// Create an empty mock reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed `checking for X... yes|no` lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Names of probes that were started, in order.
    pub fn checked(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|l| l.strip_prefix("checking for "))
            .filter_map(|l| l.rsplit_once("... ").map(|(name, _)| name.to_string()))
            .chain(self.pending.clone())
            .collect()
    }

    /// Informational messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl ProbeReporter for MockReporter {
    fn checking(&mut self, name: &str) {
        self.pending = Some(name.to_string());
    }

    fn result(&mut self, found: bool) {
        let name = self.pending.take().unwrap_or_default();
        let verdict = if found { "yes" } else { "no" };
        self.lines.push(format!("checking for {name}... {verdict}"));
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_probe_lines() {
        let mut ui = MockReporter::new();
        ui.checking("mmap");
        ui.result(true);
        ui.checking("HeapAlloc");
        ui.result(false);

        assert_eq!(
            ui.lines(),
            ["checking for mmap... yes", "checking for HeapAlloc... no"]
        );
        assert_eq!(ui.checked(), ["mmap", "HeapAlloc"]);
    }

    #[test]
    fn unfinished_probe_is_still_checked() {
        let mut ui = MockReporter::new();
        ui.checking("thread");
        assert!(ui.lines().is_empty());
        assert_eq!(ui.checked(), ["thread"]);
    }

    #[test]
    fn captures_messages_and_errors() {
        let mut ui = MockReporter::new();
        ui.message("hello");
        ui.error("thread required.");
        assert_eq!(ui.messages(), ["hello"]);
        assert_eq!(ui.errors(), ["thread required."]);
    }
}
