//! The proposition interface the formula algebra is generic over.

use crate::error::PropositionEvalError;
use crate::proposition::context::EvaluationContext;
use crate::proposition::id::PropositionId;

/// Anything that can name itself with a stable [`PropositionId`].
///
/// The model-checking facade (tableau/GBA/product) only ever needs this
/// narrower trait - it resolves atomic truth through the Kripke structure's
/// labelling, never by calling [`TemporalProposition::evaluate`].
pub trait HasPropositionId {
    fn proposition_id(&self) -> &PropositionId;
}

/// A leaf of an LTL formula: given a world (`Ctx`), produces a boolean
/// value, or one of the three documented failure modes.
pub trait TemporalProposition<Ctx: EvaluationContext>: HasPropositionId {
    fn name(&self) -> &str;

    fn evaluate(&self, ctx: &Ctx) -> Result<bool, PropositionEvalError>;
}

/// Wraps a user closure as a [`TemporalProposition`], so callers can build
/// one-off propositions without a bespoke type per proposition.
pub struct FnProposition<Ctx, F> {
    id: PropositionId,
    name: String,
    f: F,
    _marker: std::marker::PhantomData<fn(&Ctx)>,
}

impl<Ctx, F> FnProposition<Ctx, F>
where
    F: Fn(&Ctx) -> Result<bool, PropositionEvalError>,
{
    pub fn new(id: PropositionId, name: impl Into<String>, f: F) -> Self {
        FnProposition {
            id,
            name: name.into(),
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<Ctx, F> HasPropositionId for FnProposition<Ctx, F> {
    fn proposition_id(&self) -> &PropositionId {
        &self.id
    }
}

impl<Ctx, F> TemporalProposition<Ctx> for FnProposition<Ctx, F>
where
    Ctx: EvaluationContext,
    F: Fn(&Ctx) -> Result<bool, PropositionEvalError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &Ctx) -> Result<bool, PropositionEvalError> {
        (self.f)(ctx)
    }
}

// manual impls: `F: Fn` need not be `Clone`/`Debug` for us to want those on
// the wrapper when `F` happens to support them.
impl<Ctx, F: Clone> Clone for FnProposition<Ctx, F> {
    fn clone(&self) -> Self {
        FnProposition {
            id: self.id.clone(),
            name: self.name.clone(),
            f: self.f.clone(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<Ctx, F> std::fmt::Debug for FnProposition<Ctx, F> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("FnProposition")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<Ctx, F> PartialEq for FnProposition<Ctx, F> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<Ctx, F> Eq for FnProposition<Ctx, F> {}

impl<Ctx, F> std::hash::Hash for FnProposition<Ctx, F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<Ctx, F> std::fmt::Display for FnProposition<Ctx, F> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "{}", self.id)
    }
}
