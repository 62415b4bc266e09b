//! Validated proposition identifiers.
//!
//! A [`PropositionId`] is a non-empty string whose characters are each a
//! Unicode letter, a decimal digit, or one of `_-.`. This is the contract
//! every [`TemporalProposition`](crate::proposition::TemporalProposition)
//! implementor and every [`KripkeStructure`](crate::kripke::KripkeStructure)
//! labelling must honour.

use crate::error::PropositionIdError;
use std::fmt;

/// A validated, immutable proposition identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropositionId(String);

impl PropositionId {
    /// Validate and wrap `raw` as a [`PropositionId`].
    ///
    /// Succeeds iff `raw` is non-empty and every character is a letter,
    /// digit, or one of `_-.`.
    pub fn new(raw: impl Into<String>) -> Result<Self, PropositionIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PropositionIdError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(PropositionIdError::ContainsWhitespace { raw });
        }
        let invalid: Vec<char> = raw
            .chars()
            .filter(|c| !is_valid_id_char(*c))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        if !invalid.is_empty() {
            return Err(PropositionIdError::InvalidCharacters { chars: invalid });
        }
        Ok(PropositionId(raw))
    }

    /// Build a [`PropositionId`] without validation.
    ///
    /// Only safe for string literals the caller knows are valid (e.g. the
    /// fallback sentinel); anywhere else prefer [`PropositionId::new`].
    pub(crate) fn new_unchecked(raw: impl Into<String>) -> Self {
        PropositionId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_valid_id_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

impl fmt::Display for PropositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PropositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropositionId({:?})", self.0)
    }
}

impl AsRef<str> for PropositionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PropositionId {
    type Err = PropositionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropositionId::new(s)
    }
}
