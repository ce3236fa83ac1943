//! Generated header emission.
//!
//! The header layout is fixed, because consumers rely on it:
//!
//! ```text
//! #ifndef <GUARD>
//! #define <GUARD>
//!
//! #define HAVE_X            (one per success, insertion order)
//!
//! //#undef HAVE_Y           (one per failure, insertion order)
//!
//! #define NAME VALUE        (one per user macro, insertion order)
//!
//! <raw code>                (one per fragment, verbatim)
//!
//! #endif
//! ```

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::registry::ResultRegistry;

/// Include guard used when none is configured.
pub const DEFAULT_GUARD: &str = "INCLUDE_CONFIG_H_";

/// What [`HeaderEmitter::emit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The header was (re)written. Holds the defined `HAVE_*` macros.
    Written { defined: Vec<String> },
    /// The header already existed and rebuilding was not forced.
    Skipped,
}

impl EmitOutcome {
    /// Whether the header was written.
    pub fn is_written(&self) -> bool {
        matches!(self, EmitOutcome::Written { .. })
    }
}

/// Serializes a [`ResultRegistry`] into an include-guarded header.
#[derive(Debug, Clone)]
pub struct HeaderEmitter {
    guard: String,
}

impl Default for HeaderEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD)
    }
}

impl HeaderEmitter {
    /// Use `guard` as the include-guard macro.
    pub fn new(guard: impl Into<String>) -> Self {
        Self {
            guard: guard.into(),
        }
    }

    /// The include-guard macro.
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// Render the header text.
    pub fn render(&self, registry: &ResultRegistry) -> String {
        let mut out = format!("#ifndef {0}\n#define {0}\n\n", self.guard);

        for id in registry.succeeded() {
            out.push_str(&format!("#define {id}\n\n"));
        }
        for id in registry.failed() {
            out.push_str(&format!("//#undef {id}\n\n"));
        }
        for (name, value) in registry.macros() {
            out.push_str(&format!("#define {name} {value}\n\n"));
        }
        for code in registry.macro_code() {
            out.push_str(code);
            out.push_str("\n\n");
        }

        out.push_str("#endif\n");
        out
    }

    /// Write the header to `path` unless it exists and `force` is off.
    pub fn emit(&self, path: &Path, registry: &ResultRegistry, force: bool) -> Result<EmitOutcome> {
        if path.is_file() && !force {
            tracing::debug!("{} exists; leaving it untouched", path.display());
            return Ok(EmitOutcome::Skipped);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.render(registry))?;
        tracing::debug!("Wrote {}", path.display());

        Ok(EmitOutcome::Written {
            defined: registry.succeeded().map(|id| id.to_string()).collect(),
        })
    }
}
