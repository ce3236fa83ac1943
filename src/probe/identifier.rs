//! Macro identifier derivation.
//!
//! Every probe is keyed by a [`MacroIdentifier`]: the probe name with
//! `.`, `-`, `/`, `<`, `>` replaced by `_`, namespace separators (`::`)
//! collapsed to `_`, upper-cased and prefixed with `HAVE_`.

use std::fmt;

const PREFIX: &str = "HAVE_";
const SUBSTITUTED: [char; 5] = ['.', '-', '/', '<', '>'];

/// Normalized preprocessor symbol derived from a probe name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacroIdentifier(String);

impl MacroIdentifier {
    /// Derive the identifier for a raw probe name.
    ///
    /// ```
    /// use featprobe::probe::MacroIdentifier;
    ///
    /// assert_eq!(MacroIdentifier::from_name("std::mutex").as_str(), "HAVE_STD_MUTEX");
    /// assert_eq!(MacroIdentifier::from_name("sys/mman.h").as_str(), "HAVE_SYS_MMAN_H");
    /// ```
    pub fn from_name(name: &str) -> Self {
        let normalized = name
            .replace(SUBSTITUTED, "_")
            .to_uppercase()
            .replace("::", "_");
        Self(format!("{PREFIX}{normalized}"))
    }

    /// The full macro name, e.g. `HAVE_STD_MUTEX`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased name without the prefix, used as a scratch file stem.
    pub fn stem(&self) -> String {
        self.0[PREFIX.len()..].to_lowercase()
    }
}

impl fmt::Display for MacroIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MacroIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
