//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One line per probe.
    #[default]
    Normal,
    /// Errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-probe progress lines.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
