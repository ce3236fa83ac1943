//! Probe source synthesis.
//!
//! Turns a [`ProbeSpec`] into a minimal standalone C++ translation unit
//! and writes it into the scratch directory as `<stem>.cc`, where the
//! stem is the lower-cased macro identifier without its `HAVE_` prefix.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::probe::{ProbeBody, ProbeKind, ProbeSpec};

/// Default scratch directory, relative to the working directory.
pub const DEFAULT_SCRATCH_DIR: &str = ".config.tmp";

/// Source file extension for synthesized probes.
pub const SOURCE_EXTENSION: &str = "cc";

const TRIVIAL_MAIN: &str = "int main(int argc, char** argv) {\n  return 0;\n}\n";

/// Matches a fragment that already defines an entry point.
static MAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmain\s*\(").expect("MAIN_REGEX must compile"));

/// Working directory for synthesized sources and toolchain artifacts.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Use `path` as the scratch directory, creating it if absent.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            fs::create_dir_all(&path)?;
        }
        Ok(Self { path })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the synthesized source for `stem`.
    pub fn source_path(&self, stem: &str) -> PathBuf {
        self.path.join(format!("{stem}.{SOURCE_EXTENSION}"))
    }
}

/// Render the source text for a probe.
///
/// ```
/// use featprobe::probe::ProbeSpec;
/// use featprobe::synthesize::synthesize;
///
/// let source = synthesize(&ProbeSpec::header("thread"));
/// assert!(source.starts_with("#include <thread>\n"));
/// assert!(source.contains("int main("));
/// ```
pub fn synthesize(spec: &ProbeSpec) -> String {
    let mut source = String::new();

    match spec.kind() {
        ProbeKind::HeaderPresence => {
            push_includes(&mut source, spec.required_headers());
            source.push_str(TRIVIAL_MAIN);
        }
        ProbeKind::LibraryPresence => {
            source.push_str(TRIVIAL_MAIN);
        }
        ProbeKind::StructOrTypePresence => {
            push_includes(&mut source, spec.required_headers());
            if let Some(ProbeBody::TypeExpr(type_expr)) = spec.body() {
                source.push_str(&format!("typedef {type_expr} test_check;\n"));
            }
            source.push_str(TRIVIAL_MAIN);
        }
        ProbeKind::FunctionPresence => {
            push_includes(&mut source, spec.required_headers());
            source.push_str("#include <stdio.h>\n");
            source.push_str("template<typename T>\nvoid test_holder(T v) {printf(\"ok!\\n\");}\n");
            if let Some(ProbeBody::CallExpr(call)) = spec.body() {
                source.push_str(&format!(
                    "int main(int argc, char** argv) {{\n  test_holder({call});\n  return 0;\n}}\n"
                ));
            }
        }
        ProbeKind::RawCodeCompiles => {
            push_includes(&mut source, spec.required_headers());
            if let Some(ProbeBody::RawCode(code)) = spec.body() {
                source.push_str(code);
                if !code.ends_with('\n') {
                    source.push('\n');
                }
                if !MAIN_REGEX.is_match(code) {
                    source.push_str(TRIVIAL_MAIN);
                }
            }
        }
    }

    source
}

/// Synthesize the probe and write it into the scratch directory.
///
/// Returns the path of the written source file.
pub fn write_probe_source(scratch: &ScratchDir, spec: &ProbeSpec) -> Result<PathBuf> {
    let path = scratch.source_path(&spec.macro_identifier().stem());
    fs::write(&path, synthesize(spec))?;
    tracing::trace!("Wrote probe source {}", path.display());
    Ok(path)
}

fn push_includes(source: &mut String, headers: &[String]) {
    for header in headers {
        source.push_str(&format!("#include <{header}>\n"));
    }
}
