//! Typed error taxonomy for the whole crate.
//!
//! Three independent families, matching the three places failure can
//! originate: proposition *identity* (malformed ids), proposition
//! *evaluation* (user callback failures during trace evaluation), and the
//! *model-checking engine* itself (which should never fail on semantic
//! grounds for well-formed input - any failure here is a bug).

use crate::proposition::PropositionId;
use thiserror::Error;

/// Failure modes for [`PropositionId::new`](crate::proposition::PropositionId::new).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropositionIdError {
    #[error("proposition id must not be empty")]
    Empty,

    #[error("proposition id must not contain whitespace: {raw:?}")]
    ContainsWhitespace { raw: String },

    #[error("proposition id contains invalid characters: {chars:?}")]
    InvalidCharacters { chars: Vec<char> },
}

/// Failure modes for [`TemporalProposition::evaluate`](crate::proposition::TemporalProposition::evaluate).
///
/// All three variants carry the proposition's `prop_id` and `name` so that
/// user-visible messages can always point at the offending proposition.
#[derive(Debug, Error)]
pub enum PropositionEvalError {
    #[error("state not available for proposition {prop_id} ({name}): expected {expected}")]
    StateNotAvailable {
        expected: &'static str,
        prop_id: PropositionId,
        name: String,
    },

    #[error(
        "state type mismatch for proposition {prop_id} ({name}): expected {expected}, got {actual}"
    )]
    StateTypeMismatch {
        expected: &'static str,
        actual: String,
        prop_id: PropositionId,
        name: String,
    },

    #[error("evaluation failed for proposition {prop_id} ({name}): {source}")]
    UserEvaluationError {
        prop_id: PropositionId,
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PropositionEvalError {
    /// The id of the proposition this error originated from.
    pub fn prop_id(&self) -> &PropositionId {
        match self {
            PropositionEvalError::StateNotAvailable { prop_id, .. } => prop_id,
            PropositionEvalError::StateTypeMismatch { prop_id, .. } => prop_id,
            PropositionEvalError::UserEvaluationError { prop_id, .. } => prop_id,
        }
    }
}

/// The only two error kinds the verification engine itself may surface
/// (parsing/user-callback errors are distinct and propagate unchanged).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelCheckError {
    #[error("algorithm not implemented: {culprit}")]
    AlgorithmsNotImplemented { culprit: String },

    #[error("internal processing error: {details}")]
    InternalProcessingError { details: String },
}

impl ModelCheckError {
    pub fn internal(details: impl Into<String>) -> Self {
        ModelCheckError::InternalProcessingError {
            details: details.into(),
        }
    }

    pub fn not_implemented(culprit: impl Into<String>) -> Self {
        ModelCheckError::AlgorithmsNotImplemented {
            culprit: culprit.into(),
        }
    }
}

/// Error surfaced by the trace evaluator: either the engine's own
/// bookkeeping failed, or a user proposition raised an evaluation error.
#[derive(Debug, Error)]
pub enum TraceEvalError {
    #[error(transparent)]
    Proposition(#[from] PropositionEvalError),

    #[error("internal processing error: {0}")]
    Internal(String),
}
