//! Probe result registry.
//!
//! The registry records one outcome per [`MacroIdentifier`] for the
//! lifetime of a run, in insertion order. Outcomes are write-once: a later
//! record for an identifier that already has one is ignored.
//!
//! It also holds the user-defined macros and raw code fragments that the
//! header emitter writes after the probe results.

use std::collections::HashMap;

use crate::error::Result;
use crate::probe::{MacroIdentifier, PairedGroup, ProbeGroup, ProbeSpec};

/// Outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The probe compiled (or linked).
    Succeeded,
    /// The probe did not compile (or link).
    Failed,
}

impl Outcome {
    /// Map a boolean check result to an outcome.
    pub fn from_success(succeeded: bool) -> Self {
        if succeeded {
            Outcome::Succeeded
        } else {
            Outcome::Failed
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Result of evaluating one [`ProbeGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResult {
    /// Whether some variant succeeded.
    pub succeeded: bool,
    /// Name of the variant that decided a successful group.
    pub winning_variant: Option<String>,
}

impl GroupResult {
    fn success(variant: &ProbeSpec) -> Self {
        Self {
            succeeded: true,
            winning_variant: Some(variant.identifier().to_string()),
        }
    }

    fn failure() -> Self {
        Self {
            succeeded: false,
            winning_variant: None,
        }
    }
}

/// Accumulated probe outcomes and user-defined header content.
#[derive(Debug, Clone, Default)]
pub struct ResultRegistry {
    outcomes: Vec<(MacroIdentifier, Outcome)>,
    index: HashMap<MacroIdentifier, usize>,
    macros: Vec<(String, String)>,
    macro_code: Vec<String>,
}

impl ResultRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome. Returns `false` if `identifier` was already decided.
    pub fn record(&mut self, identifier: MacroIdentifier, succeeded: bool) -> bool {
        if self.index.contains_key(&identifier) {
            tracing::trace!("{} already recorded; keeping first outcome", identifier);
            return false;
        }
        self.index.insert(identifier.clone(), self.outcomes.len());
        self.outcomes
            .push((identifier, Outcome::from_success(succeeded)));
        true
    }

    /// Whether `identifier` has a recorded outcome.
    pub fn has_result(&self, identifier: &MacroIdentifier) -> bool {
        self.index.contains_key(identifier)
    }

    /// The recorded outcome for `identifier`, if any.
    pub fn outcome(&self, identifier: &MacroIdentifier) -> Option<Outcome> {
        self.index.get(identifier).map(|&i| self.outcomes[i].1)
    }

    /// All outcomes in insertion order.
    pub fn outcomes(&self) -> &[(MacroIdentifier, Outcome)] {
        &self.outcomes
    }

    /// Successful identifiers in insertion order.
    pub fn succeeded(&self) -> impl Iterator<Item = &MacroIdentifier> {
        self.with_outcome(Outcome::Succeeded)
    }

    /// Failed identifiers in insertion order.
    pub fn failed(&self) -> impl Iterator<Item = &MacroIdentifier> {
        self.with_outcome(Outcome::Failed)
    }

    fn with_outcome(&self, wanted: Outcome) -> impl Iterator<Item = &MacroIdentifier> {
        self.outcomes
            .iter()
            .filter(move |(_, outcome)| *outcome == wanted)
            .map(|(id, _)| id)
    }

    /// Define `name` as `value` in the header. Redefining keeps the first position.
    pub fn add_macro(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.macros.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.macros.push((name, value)),
        }
    }

    /// Append a raw code fragment to the header.
    pub fn add_macro_code(&mut self, code: impl Into<String>) {
        self.macro_code.push(code.into());
    }

    /// User-defined macros in insertion order.
    pub fn macros(&self) -> &[(String, String)] {
        &self.macros
    }

    /// Raw code fragments in insertion order.
    pub fn macro_code(&self) -> &[String] {
        &self.macro_code
    }

    /// Evaluate a group's variants in order with `check`.
    ///
    /// The first variant that passes ends the group. A variant already
    /// decided in an earlier group is not checked again: a recorded success
    /// ends the group, a recorded failure moves on to the next variant.
    pub fn evaluate_group<F>(&mut self, group: &ProbeGroup, mut check: F) -> Result<GroupResult>
    where
        F: FnMut(&ProbeSpec) -> Result<bool>,
    {
        for variant in group.variants() {
            if self.decide(variant, &mut check)? {
                return Ok(GroupResult::success(variant));
            }
        }

        Ok(GroupResult::failure())
    }

    /// Evaluate header/library pairs in order with `check`.
    ///
    /// Both probes of a pair always run, so each gets its own outcome. The
    /// first pair where both pass ends the group.
    pub fn evaluate_pairs<F>(&mut self, group: &PairedGroup, mut check: F) -> Result<GroupResult>
    where
        F: FnMut(&ProbeSpec) -> Result<bool>,
    {
        for pair in group.pairs() {
            let header = self.decide(pair.header(), &mut check)?;
            let library = self.decide(pair.library(), &mut check)?;
            if header && library {
                return Ok(GroupResult::success(pair.library()));
            }
        }

        Ok(GroupResult::failure())
    }

    /// Recorded outcome for `spec`, or run `check` and record it.
    fn decide<F>(&mut self, spec: &ProbeSpec, check: &mut F) -> Result<bool>
    where
        F: FnMut(&ProbeSpec) -> Result<bool>,
    {
        let identifier = spec.macro_identifier();
        if let Some(outcome) = self.outcome(&identifier) {
            tracing::debug!("{} already decided ({:?})", identifier, outcome);
            return Ok(outcome.is_success());
        }

        let passed = check(spec)?;
        self.record(identifier, passed);
        Ok(passed)
    }
}
