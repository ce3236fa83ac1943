//! Visual theme and styling.

use console::Style;

/// Styles for probe output.
#[derive(Debug, Clone)]
pub struct ProbeTheme {
    /// Style for a found feature (green).
    pub found: Style,
    /// Style for a missing feature (dim).
    pub missing: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for probe names (bold).
    pub name: Style,
}

impl Default for ProbeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            found: Style::new().green(),
            missing: Style::new().dim(),
            error: Style::new().red().bold(),
            name: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            found: Style::new(),
            missing: Style::new(),
            error: Style::new(),
            name: Style::new(),
        }
    }

    /// Format the `yes`/`no` verdict for a probe.
    pub fn format_verdict(&self, found: bool) -> String {
        if found {
            self.found.apply_to("yes").to_string()
        } else {
            self.missing.apply_to("no").to_string()
        }
    }

    /// Format the lead-in of a probe line.
    pub fn format_checking(&self, name: &str) -> String {
        format!("checking for {}... ", self.name.apply_to(name))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(msg).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
