//! Probe declarations and identifier derivation.
//!
//! - [`spec`] - [`ProbeSpec`], [`ProbeGroup`] and [`PairedGroup`]
//! - [`identifier`] - [`MacroIdentifier`] derivation

pub mod identifier;
pub mod spec;

pub use identifier::MacroIdentifier;
pub use spec::{HeaderLibraryPair, PairedGroup, ProbeBody, ProbeGroup, ProbeKind, ProbeSpec};
