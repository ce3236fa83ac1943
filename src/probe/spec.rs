//! Probe declarations.
//!
//! A [`ProbeSpec`] describes one checkable feature. A [`ProbeGroup`] is an
//! ordered list of alternative specs for one capability, tried in
//! declaration order until one succeeds.

use super::identifier::MacroIdentifier;
use crate::error::{ProbeError, Result};

/// What a probe checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// A header can be included.
    HeaderPresence,
    /// A library can be linked.
    LibraryPresence,
    /// A type expression names a valid type.
    StructOrTypePresence,
    /// A call expression compiles.
    FunctionPresence,
    /// A literal code fragment compiles.
    RawCodeCompiles,
}

impl ProbeKind {
    /// Whether this kind is proven by linking rather than compiling.
    pub fn is_library_check(&self) -> bool {
        matches!(self, ProbeKind::LibraryPresence)
    }

    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeKind::HeaderPresence => "header",
            ProbeKind::LibraryPresence => "lib",
            ProbeKind::StructOrTypePresence => "type",
            ProbeKind::FunctionPresence => "function",
            ProbeKind::RawCodeCompiles => "code",
        }
    }
}

/// The kind-specific payload of a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeBody {
    /// Type expression bound to an alias.
    TypeExpr(String),
    /// Call expression passed to a generic sink.
    CallExpr(String),
    /// Code fragment spliced verbatim.
    RawCode(String),
}

/// One checkable feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    identifier: String,
    kind: ProbeKind,
    required_headers: Vec<String>,
    body: Option<ProbeBody>,
    link_target: Option<String>,
}

impl ProbeSpec {
    /// Build a spec from raw parts, validating that the body matches the kind.
    pub fn new(
        identifier: impl Into<String>,
        kind: ProbeKind,
        required_headers: Vec<String>,
        body: Option<ProbeBody>,
        link_target: Option<String>,
    ) -> Result<Self> {
        let spec = Self {
            identifier: identifier.into(),
            kind,
            required_headers,
            body,
            link_target,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that a header can be included. The header name is the identifier.
    pub fn header(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            kind: ProbeKind::HeaderPresence,
            required_headers: vec![name],
            body: None,
            link_target: None,
        }
    }

    /// Check that a library links, using its name as the link target.
    pub fn library(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            kind: ProbeKind::LibraryPresence,
            required_headers: Vec::new(),
            body: None,
            link_target: Some(name),
        }
    }

    /// Check that a library links, naming the link target explicitly.
    pub fn library_at(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            identifier: name.into(),
            kind: ProbeKind::LibraryPresence,
            required_headers: Vec::new(),
            body: None,
            link_target: Some(target.into()),
        }
    }

    /// Check that `type_expr` names a type once `headers` are included.
    pub fn type_alias(
        name: impl Into<String>,
        headers: &[&str],
        type_expr: impl Into<String>,
    ) -> Self {
        Self {
            identifier: name.into(),
            kind: ProbeKind::StructOrTypePresence,
            required_headers: to_owned_list(headers),
            body: Some(ProbeBody::TypeExpr(type_expr.into())),
            link_target: None,
        }
    }

    /// Check that `call_expr` compiles once `headers` are included.
    pub fn function(
        name: impl Into<String>,
        headers: &[&str],
        call_expr: impl Into<String>,
    ) -> Self {
        Self {
            identifier: name.into(),
            kind: ProbeKind::FunctionPresence,
            required_headers: to_owned_list(headers),
            body: Some(ProbeBody::CallExpr(call_expr.into())),
            link_target: None,
        }
    }

    /// Check that a literal code fragment compiles once `headers` are included.
    pub fn code(name: impl Into<String>, headers: &[&str], code: impl Into<String>) -> Self {
        Self {
            identifier: name.into(),
            kind: ProbeKind::RawCodeCompiles,
            required_headers: to_owned_list(headers),
            body: Some(ProbeBody::RawCode(code.into())),
            link_target: None,
        }
    }

    /// Validate that exactly the body form expected for the kind is present.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(self.invalid("probe name must not be empty"));
        }

        match (self.kind, &self.body) {
            (ProbeKind::HeaderPresence, None) => {
                if self.required_headers.len() != 1 {
                    return Err(self.invalid("header probes include exactly one header"));
                }
            }
            (ProbeKind::LibraryPresence, None) => {}
            (ProbeKind::StructOrTypePresence, Some(ProbeBody::TypeExpr(_)))
            | (ProbeKind::FunctionPresence, Some(ProbeBody::CallExpr(_)))
            | (ProbeKind::RawCodeCompiles, Some(ProbeBody::RawCode(_))) => {}
            (kind, body) => {
                return Err(self.invalid(&format!(
                    "{:?} probe cannot carry body {:?}",
                    kind, body
                )));
            }
        }

        match (self.kind.is_library_check(), &self.link_target) {
            (true, Some(target)) if target.trim().is_empty() => {
                Err(self.invalid("link target must not be empty"))
            }
            (true, None) => Err(self.invalid("library probes need a link target")),
            (false, Some(_)) => Err(self.invalid("only library probes take a link target")),
            _ => Ok(()),
        }
    }

    /// Human-readable name, e.g. `std::mutex`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The derived registry key and emitted macro name.
    pub fn macro_identifier(&self) -> MacroIdentifier {
        MacroIdentifier::from_name(&self.identifier)
    }

    /// The kind of check.
    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Headers included before the check body.
    pub fn required_headers(&self) -> &[String] {
        &self.required_headers
    }

    /// The kind-specific body, if any.
    pub fn body(&self) -> Option<&ProbeBody> {
        self.body.as_ref()
    }

    /// Library name or path for library probes.
    pub fn link_target(&self) -> Option<&str> {
        self.link_target.as_deref()
    }

    fn invalid(&self, message: &str) -> ProbeError {
        ProbeError::InvalidProbe {
            name: self.identifier.clone(),
            message: message.to_string(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Alternative ways of satisfying one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeGroup {
    variants: Vec<ProbeSpec>,
    mandatory: bool,
    failure_message: String,
}

impl ProbeGroup {
    /// Build a group, validating every variant.
    pub fn new(
        variants: Vec<ProbeSpec>,
        mandatory: bool,
        failure_message: impl Into<String>,
    ) -> Result<Self> {
        if variants.is_empty() {
            return Err(ProbeError::InvalidProbe {
                name: String::new(),
                message: "a probe group needs at least one variant".to_string(),
            });
        }
        for variant in &variants {
            variant.validate()?;
        }
        Ok(Self {
            variants,
            mandatory,
            failure_message: failure_message.into(),
        })
    }

    /// A group of header alternatives.
    pub fn headers(mandatory: bool, names: &[&str], message: &str) -> Result<Self> {
        Self::new(
            names.iter().map(|n| ProbeSpec::header(*n)).collect(),
            mandatory,
            message,
        )
    }

    /// A group of library alternatives, each linked by name.
    pub fn libraries(mandatory: bool, names: &[&str], message: &str) -> Result<Self> {
        Self::new(
            names.iter().map(|n| ProbeSpec::library(*n)).collect(),
            mandatory,
            message,
        )
    }

    /// A group of type, function, or code alternatives.
    pub fn code(mandatory: bool, variants: Vec<ProbeSpec>, message: &str) -> Result<Self> {
        Self::new(variants, mandatory, message)
    }

    /// Variants in the order they are tried.
    pub fn variants(&self) -> &[ProbeSpec] {
        &self.variants
    }

    /// Whether total failure aborts the run.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Message surfaced when a mandatory group fails.
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Display name of the group (its first variant).
    pub fn name(&self) -> &str {
        self.variants
            .first()
            .map(|v| v.identifier())
            .unwrap_or_default()
    }
}

/// A header probe and a library probe that satisfy a capability together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLibraryPair {
    header: ProbeSpec,
    library: ProbeSpec,
}

impl HeaderLibraryPair {
    /// Pair `header` with a library linked by `name`.
    pub fn new(header: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            header: ProbeSpec::header(header),
            library: ProbeSpec::library(name),
        }
    }

    /// Pair `header` with a library named `name` linked against `target`.
    pub fn with_target(
        header: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            header: ProbeSpec::header(header),
            library: ProbeSpec::library_at(name, target),
        }
    }

    /// The header half.
    pub fn header(&self) -> &ProbeSpec {
        &self.header
    }

    /// The library half.
    pub fn library(&self) -> &ProbeSpec {
        &self.library
    }
}

/// Alternative header/library pairs for one capability.
///
/// Both probes of a pair are run; the first pair where both succeed
/// satisfies the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedGroup {
    pairs: Vec<HeaderLibraryPair>,
    mandatory: bool,
    failure_message: String,
}

impl PairedGroup {
    /// Build a group, validating both halves of every pair.
    pub fn new(
        pairs: Vec<HeaderLibraryPair>,
        mandatory: bool,
        failure_message: impl Into<String>,
    ) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ProbeError::InvalidProbe {
                name: String::new(),
                message: "a probe group needs at least one variant".to_string(),
            });
        }
        for pair in &pairs {
            pair.header.validate()?;
            pair.library.validate()?;
        }
        Ok(Self {
            pairs,
            mandatory,
            failure_message: failure_message.into(),
        })
    }

    /// Pairs in the order they are tried.
    pub fn pairs(&self) -> &[HeaderLibraryPair] {
        &self.pairs
    }

    /// Whether total failure aborts the run.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Message surfaced when a mandatory group fails.
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Display name of the group (its first library).
    pub fn name(&self) -> &str {
        self.pairs
            .first()
            .map(|p| p.library.identifier())
            .unwrap_or_default()
    }
}
