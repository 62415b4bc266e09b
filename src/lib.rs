//! An explicit-state model checker for Linear Temporal Logic.
//!
//! Checks whether every infinite run of a finite [`KripkeStructure`] satisfies
//! an [`LtlFormula`]. The pipeline: normalize the negated formula to negation
//! normal form, build its tableau as a Generalized Büchi Automaton, fold the
//! acceptance family down to a single set (degeneralization), take the
//! synchronous product with the model, and search it for an accepting lasso
//! with nested DFS. An accepting lasso is a concrete counterexample run; its
//! absence means the formula holds.
//!
//! Also exposes a standalone trace evaluator ([`trace`]) for checking a
//! single concrete (possibly lasso-shaped) run against a formula without
//! building any automaton.

pub mod automaton;
pub mod checker;
pub mod config;
pub mod error;
pub mod formula;
pub mod kripke;
pub mod product;
pub mod proposition;
pub mod tableau;
pub mod trace;

pub use checker::{LtlModelChecker, ModelCheckResult};
pub use config::CheckerConfig;
pub use error::{ModelCheckError, PropositionEvalError, PropositionIdError, TraceEvalError};
pub use formula::{f, g, r, u, w, x, LtlFormula};
pub use kripke::{ExplicitKripkeStructure, KripkeStructure};
pub use product::Counterexample;
pub use proposition::{
    ErasedStateContext, EvaluationContext, FnProposition, HasPropositionId, PropositionId,
    PropositionIdFactory, SeededPropositionIdFactory, StateLookup, TemporalProposition,
};
