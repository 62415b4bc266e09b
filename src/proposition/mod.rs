//! Proposition identity, evaluation context, and the proposition interface
//! the formula algebra is generic over.

mod context;
mod factory;
mod id;
mod temporal;

pub use context::{ErasedStateContext, EvaluationContext, StateLookup};
pub use factory::{PropositionIdFactory, SeededPropositionIdFactory, FALLBACK_PROPOSITION_ID};
pub use id::PropositionId;
pub use temporal::{FnProposition, HasPropositionId, TemporalProposition};
