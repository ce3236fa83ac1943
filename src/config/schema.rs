//! Probe manifest schema.
//!
//! These structs map to the YAML manifest the CLI reads. Conversion into
//! [`Check`] values validates that every candidate carries exactly the
//! fields its check kind allows.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{ProbeError, Result};
use crate::probe::{
    HeaderLibraryPair, PairedGroup, ProbeBody, ProbeGroup, ProbeKind, ProbeSpec,
};

/// Root manifest structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeManifest {
    /// Path of the generated header.
    pub header: PathBuf,

    /// Include-guard macro.
    pub guard: Option<String>,

    /// Scratch directory for probe sources.
    pub scratch_dir: Option<PathBuf>,

    /// Re-run probes even if the header exists.
    pub always_build: bool,

    /// Probe groups in the order they run.
    pub checks: Vec<CheckConfig>,

    /// User-defined macros, in header order.
    pub macros: Vec<MacroConfig>,

    /// Verbatim code fragments, in header order.
    pub macro_code: Vec<String>,
}

impl Default for ProbeManifest {
    fn default() -> Self {
        Self {
            header: default_header(),
            guard: None,
            scratch_dir: None,
            always_build: false,
            checks: Vec::new(),
            macros: Vec::new(),
            macro_code: Vec::new(),
        }
    }
}

fn default_header() -> PathBuf {
    PathBuf::from("config.h")
}

impl ProbeManifest {
    /// Convert every check into a validated [`Check`].
    pub fn to_checks(&self) -> Result<Vec<Check>> {
        self.checks.iter().map(CheckConfig::to_check).collect()
    }
}

/// A validated check, ready to run.
#[derive(Debug, Clone)]
pub enum Check {
    /// Alternatives tried until one succeeds.
    Alternatives(ProbeGroup),
    /// Header/library pairs, both halves probed per pair.
    Paired(PairedGroup),
}

impl Check {
    /// Display name of the check.
    pub fn name(&self) -> &str {
        match self {
            Check::Alternatives(group) => group.name(),
            Check::Paired(group) => group.name(),
        }
    }

    /// Whether total failure aborts the run.
    pub fn is_mandatory(&self) -> bool {
        match self {
            Check::Alternatives(group) => group.is_mandatory(),
            Check::Paired(group) => group.is_mandatory(),
        }
    }

    /// Message surfaced when a mandatory check fails.
    pub fn failure_message(&self) -> &str {
        match self {
            Check::Alternatives(group) => group.failure_message(),
            Check::Paired(group) => group.failure_message(),
        }
    }

    /// Every spec the check may run, in order. A pair lists its header
    /// before its library.
    pub fn specs(&self) -> Vec<&ProbeSpec> {
        match self {
            Check::Alternatives(group) => group.variants().iter().collect(),
            Check::Paired(group) => group
                .pairs()
                .iter()
                .flat_map(|pair| [pair.header(), pair.library()])
                .collect(),
        }
    }
}

/// What a check group probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Header candidates.
    Header,
    /// Library candidates.
    Lib,
    /// Type, function, or code candidates.
    Code,
    /// Library candidates each paired with one header.
    LibAndHeader,
}

/// One probe group.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Candidate kind.
    pub kind: CheckKind,

    /// Abort the run if no candidate succeeds.
    #[serde(default)]
    pub required: bool,

    /// Message printed when a required group fails.
    #[serde(default)]
    pub message: String,

    /// Alternatives, tried in order.
    pub candidates: Vec<CandidateConfig>,
}

/// A candidate: either a bare name or a detailed entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateConfig {
    /// Header or library name.
    Name(String),
    /// Entry with headers and a body.
    Detailed(CandidateDetail),
}

/// Detailed candidate fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateDetail {
    /// Probe name, used to derive the macro.
    pub name: String,

    /// Headers included before the body.
    #[serde(default)]
    pub header: Vec<String>,

    /// Type expression.
    #[serde(rename = "struct")]
    pub type_expr: Option<String>,

    /// Call expression.
    pub function: Option<String>,

    /// Literal code fragment.
    pub code: Option<String>,

    /// Library link target.
    pub lib: Option<String>,
}

impl CandidateDetail {
    fn bodies(&self) -> Vec<ProbeBody> {
        let mut bodies = Vec::new();
        if let Some(t) = &self.type_expr {
            bodies.push(ProbeBody::TypeExpr(t.clone()));
        }
        if let Some(f) = &self.function {
            bodies.push(ProbeBody::CallExpr(f.clone()));
        }
        if let Some(c) = &self.code {
            bodies.push(ProbeBody::RawCode(c.clone()));
        }
        bodies
    }
}

/// A user-defined `#define NAME VALUE`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MacroConfig {
    /// Macro name.
    pub name: String,
    /// Replacement text.
    #[serde(default)]
    pub value: String,
}

impl CheckConfig {
    /// Convert into a validated [`Check`].
    pub fn to_check(&self) -> Result<Check> {
        if self.kind == CheckKind::LibAndHeader {
            let pairs = self
                .candidates
                .iter()
                .map(to_pair)
                .collect::<Result<Vec<_>>>()?;
            let group = PairedGroup::new(pairs, self.required, self.message.clone())?;
            return Ok(Check::Paired(group));
        }

        let variants = self
            .candidates
            .iter()
            .map(|c| self.to_spec(c))
            .collect::<Result<Vec<_>>>()?;
        let group = ProbeGroup::new(variants, self.required, self.message.clone())?;
        Ok(Check::Alternatives(group))
    }

    fn to_spec(&self, candidate: &CandidateConfig) -> Result<ProbeSpec> {
        match (self.kind, candidate) {
            (CheckKind::Header, CandidateConfig::Name(name)) => Ok(ProbeSpec::header(name)),
            (CheckKind::Lib, CandidateConfig::Name(name)) => Ok(ProbeSpec::library(name)),
            (CheckKind::Code, CandidateConfig::Name(name)) => Err(invalid(format!(
                "code candidate '{}' needs one of struct, function, code",
                name
            ))),
            (CheckKind::LibAndHeader, _) => Err(invalid(
                "lib_and_header candidates are pairs, not alternatives".to_string(),
            )),
            (CheckKind::Header, CandidateConfig::Detailed(d)) => {
                if !d.header.is_empty() || !d.bodies().is_empty() || d.lib.is_some() {
                    return Err(invalid(format!(
                        "header candidate '{}' only takes a name",
                        d.name
                    )));
                }
                Ok(ProbeSpec::header(&d.name))
            }
            (CheckKind::Lib, CandidateConfig::Detailed(d)) => {
                if !d.header.is_empty() || !d.bodies().is_empty() {
                    return Err(invalid(format!(
                        "lib candidate '{}' only takes a name and lib",
                        d.name
                    )));
                }
                Ok(match &d.lib {
                    Some(target) => ProbeSpec::library_at(&d.name, target),
                    None => ProbeSpec::library(&d.name),
                })
            }
            (CheckKind::Code, CandidateConfig::Detailed(d)) => {
                if d.lib.is_some() {
                    return Err(invalid(format!(
                        "code candidate '{}' cannot take lib",
                        d.name
                    )));
                }
                let mut bodies = d.bodies();
                if bodies.len() != 1 {
                    return Err(invalid(format!(
                        "code candidate '{}' needs exactly one of struct, function, code",
                        d.name
                    )));
                }
                let body = bodies.remove(0);
                let kind = match body {
                    ProbeBody::TypeExpr(_) => ProbeKind::StructOrTypePresence,
                    ProbeBody::CallExpr(_) => ProbeKind::FunctionPresence,
                    ProbeBody::RawCode(_) => ProbeKind::RawCodeCompiles,
                };
                ProbeSpec::new(&d.name, kind, d.header.clone(), Some(body), None)
            }
        }
    }
}

fn to_pair(candidate: &CandidateConfig) -> Result<HeaderLibraryPair> {
    let detail = match candidate {
        CandidateConfig::Name(name) => {
            return Err(invalid(format!(
                "lib_and_header candidate '{}' needs a header",
                name
            )))
        }
        CandidateConfig::Detailed(d) => d,
    };
    if detail.header.len() != 1 || !detail.bodies().is_empty() {
        return Err(invalid(format!(
            "lib_and_header candidate '{}' takes a name, exactly one header, and an optional lib",
            detail.name
        )));
    }
    let header = &detail.header[0];
    Ok(match &detail.lib {
        Some(target) => HeaderLibraryPair::with_target(header, &detail.name, target),
        None => HeaderLibraryPair::new(header, &detail.name),
    })
}

fn invalid(message: String) -> ProbeError {
    ProbeError::ManifestInvalid { message }
}
