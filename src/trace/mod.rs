//! Denotational semantics of LTL on finite and lasso-shaped traces.
//!
//! Shares the formula algebra with the tableau/GBA path and serves both as
//! a public capability (checking a single concrete run against a formula
//! without building an automaton) and as a cross-check oracle in tests.

use crate::error::PropositionEvalError;
use crate::formula::LtlFormula;
use crate::proposition::{EvaluationContext, TemporalProposition};
use std::rc::Rc;

/// One-step unfolding of `formula` against the current evaluation context:
/// returns whether `formula` holds *now*, plus the obligation deferred to
/// the next index.
///
/// `next φ` always returns `(true, φ)` regardless of whatever would
/// eventually go wrong inside `φ` - the obligation is deferred, not
/// evaluated, so an error inside `φ` does not fire until `φ` is itself
/// stepped at the next index. This is intentional, not an oversight: a
/// caller that never advances past this index never pays for evaluating an
/// obligation it doesn't need.
pub fn step<P, Ctx>(
    formula: &LtlFormula<P>,
    ctx: &Ctx,
) -> Result<(bool, LtlFormula<P>), PropositionEvalError>
where
    P: Clone + TemporalProposition<Ctx>,
    Ctx: EvaluationContext,
{
    use LtlFormula::*;
    Ok(match formula {
        BooleanLiteral(v) => (*v, BooleanLiteral(true)),
        Atomic(p) => (p.evaluate(ctx)?, LtlFormula::constant(true)),
        Not(a) => {
            let (holds, _) = step(a, ctx)?;
            (!holds, LtlFormula::constant(true))
        }
        And(a, b) => {
            let (ha, _) = step(a, ctx)?;
            let (hb, _) = step(b, ctx)?;
            (ha && hb, LtlFormula::constant(true))
        }
        Or(a, b) => {
            let (ha, _) = step(a, ctx)?;
            let (hb, _) = step(b, ctx)?;
            (ha || hb, LtlFormula::constant(true))
        }
        Implies(a, b) => {
            let (ha, _) = step(a, ctx)?;
            let (hb, _) = step(b, ctx)?;
            (!ha || hb, LtlFormula::constant(true))
        }
        Next(a) => (true, (**a).clone()),
        Eventually(a) => {
            let (holds, _) = step(a, ctx)?;
            if holds {
                (true, LtlFormula::constant(true))
            } else {
                (false, Eventually(a.clone()))
            }
        }
        Globally(a) => {
            let (holds, _) = step(a, ctx)?;
            if holds {
                (true, Globally(a.clone()))
            } else {
                (false, LtlFormula::constant(false))
            }
        }
        // Until/WeakUntil/Release step via their standard expansion laws
        // (aUb = b | (a & X(aUb)), aWb = b | (a & X(aWb)), aRb = b & (a | X(aRb))).
        Until(a, b) => {
            let (hb, _) = step(b, ctx)?;
            if hb {
                (true, LtlFormula::constant(true))
            } else if step(a, ctx)?.0 {
                (true, Until(a.clone(), b.clone()))
            } else {
                (false, LtlFormula::constant(false))
            }
        }
        WeakUntil(a, b) => {
            let (hb, _) = step(b, ctx)?;
            if hb {
                (true, LtlFormula::constant(true))
            } else if step(a, ctx)?.0 {
                (true, WeakUntil(a.clone(), b.clone()))
            } else {
                (false, LtlFormula::constant(false))
            }
        }
        Release(a, b) => {
            let (hb, _) = step(b, ctx)?;
            if !hb {
                (false, LtlFormula::constant(false))
            } else if step(a, ctx)?.0 {
                (true, LtlFormula::constant(true))
            } else {
                (true, Release(a.clone(), b.clone()))
            }
        }
    })
}

/// Evaluates `formula` on a bare finite trace (no declared cycle): `G`
/// demands truth at every remaining index, `F` at some remaining index,
/// `U`/`W`/`R` per their standard finite-horizon definitions.
pub fn evaluate<P, Ctx>(
    formula: &LtlFormula<P>,
    trace: &[Rc<Ctx>],
) -> Result<bool, PropositionEvalError>
where
    P: Clone + TemporalProposition<Ctx>,
    Ctx: EvaluationContext,
{
    assert!(!trace.is_empty(), "evaluate requires a non-empty trace");
    eval_at(formula, trace, 0)
}

fn eval_at<P, Ctx>(formula: &LtlFormula<P>, trace: &[Rc<Ctx>], i: usize) -> Result<bool, PropositionEvalError>
where
    P: Clone + TemporalProposition<Ctx>,
    Ctx: EvaluationContext,
{
    use LtlFormula::*;
    let n = trace.len();
    Ok(match formula {
        BooleanLiteral(v) => *v,
        Atomic(p) => p.evaluate(&trace[i])?,
        Not(a) => !eval_at(a, trace, i)?,
        And(a, b) => eval_at(a, trace, i)? && eval_at(b, trace, i)?,
        Or(a, b) => eval_at(a, trace, i)? || eval_at(b, trace, i)?,
        Implies(a, b) => !eval_at(a, trace, i)? || eval_at(b, trace, i)?,
        Next(a) => i + 1 < n && eval_at(a, trace, i + 1)?,
        Globally(a) => {
            for j in i..n {
                if !eval_at(a, trace, j)? {
                    return Ok(false);
                }
            }
            true
        }
        Eventually(a) => {
            for j in i..n {
                if eval_at(a, trace, j)? {
                    return Ok(true);
                }
            }
            false
        }
        Until(a, b) => {
            for j in i..n {
                if eval_at(b, trace, j)? {
                    for k in i..j {
                        if !eval_at(a, trace, k)? {
                            return Ok(false);
                        }
                    }
                    return Ok(true);
                }
            }
            false
        }
        WeakUntil(a, b) => {
            eval_at(&Until(a.clone(), b.clone()), trace, i)? || eval_at(&Globally(a.clone()), trace, i)?
        }
        Release(a, b) => {
            !eval_at(
                &Until(Rc::new(Not(a.clone())), Rc::new(Not(b.clone()))),
                trace,
                i,
            )?
        }
    })
}

/// Evaluates `formula` on a lasso trace `prefix · cycle^ω`, folding the
/// cycle so liveness operators (`F`, `G`, `U`, `W`, `R`) see the genuine
/// infinite unfolding rather than a finite-horizon approximation.
///
/// Positions are addressed through [`state_at`], which maps any logical
/// index `i` (however large `i` grows under nested liveness operators) back
/// onto `prefix`/`cycle` by wrapping the cycle portion modulo its length,
/// rather than materializing a fixed number of unrolled laps - a fixed lap
/// count is exhausted by formulas nested deeper than the laps anticipated
/// (e.g. `G G G a`), which then indexes past the unrolled buffer's end.
pub fn evaluate_lasso<P, Ctx>(
    formula: &LtlFormula<P>,
    prefix: &[Rc<Ctx>],
    cycle: &[Rc<Ctx>],
) -> Result<bool, PropositionEvalError>
where
    P: Clone + TemporalProposition<Ctx>,
    Ctx: EvaluationContext,
{
    assert!(!cycle.is_empty(), "evaluate_lasso requires a non-empty cycle");
    eval_lasso_at(formula, prefix, cycle, 0)
}

/// Maps a logical lasso index `i` onto its concrete state: the prefix for
/// `i < prefix.len()`, otherwise the cycle wrapped modulo its length. Valid
/// for any `i`, no matter how far past `prefix.len() + cycle.len()` nested
/// liveness operators have advanced it.
fn state_at<'a, Ctx>(prefix: &'a [Rc<Ctx>], cycle: &'a [Rc<Ctx>], i: usize) -> &'a Rc<Ctx> {
    match i.checked_sub(prefix.len()) {
        None => &prefix[i],
        Some(into_cycle) => &cycle[into_cycle % cycle.len()],
    }
}

fn eval_lasso_at<P, Ctx>(
    formula: &LtlFormula<P>,
    prefix: &[Rc<Ctx>],
    cycle: &[Rc<Ctx>],
    i: usize,
) -> Result<bool, PropositionEvalError>
where
    P: Clone + TemporalProposition<Ctx>,
    Ctx: EvaluationContext,
{
    use LtlFormula::*;
    let loop_start = prefix.len();
    let cycle_len = cycle.len();
    // One full lap of the cycle is always enough to resolve (or rule out) a
    // liveness obligation requested anywhere within it, since whether a
    // cycle state satisfies a sub-obligation is positionally fixed on every
    // lap.
    let horizon = |i: usize| if i < loop_start { loop_start + cycle_len } else { i + cycle_len };
    Ok(match formula {
        BooleanLiteral(v) => *v,
        Atomic(p) => p.evaluate(state_at(prefix, cycle, i))?,
        Not(a) => !eval_lasso_at(a, prefix, cycle, i)?,
        And(a, b) => eval_lasso_at(a, prefix, cycle, i)? && eval_lasso_at(b, prefix, cycle, i)?,
        Or(a, b) => eval_lasso_at(a, prefix, cycle, i)? || eval_lasso_at(b, prefix, cycle, i)?,
        Implies(a, b) => !eval_lasso_at(a, prefix, cycle, i)? || eval_lasso_at(b, prefix, cycle, i)?,
        Next(a) => eval_lasso_at(a, prefix, cycle, i + 1)?,
        Globally(a) => {
            for j in i..horizon(i) {
                if !eval_lasso_at(a, prefix, cycle, j)? {
                    return Ok(false);
                }
            }
            true
        }
        Eventually(a) => {
            for j in i..horizon(i) {
                if eval_lasso_at(a, prefix, cycle, j)? {
                    return Ok(true);
                }
            }
            false
        }
        Until(a, b) => {
            for j in i..horizon(i) {
                if eval_lasso_at(b, prefix, cycle, j)? {
                    for k in i..j {
                        if !eval_lasso_at(a, prefix, cycle, k)? {
                            return Ok(false);
                        }
                    }
                    return Ok(true);
                }
            }
            false
        }
        WeakUntil(a, b) => {
            eval_lasso_at(&Until(a.clone(), b.clone()), prefix, cycle, i)?
                || eval_lasso_at(&Globally(a.clone()), prefix, cycle, i)?
        }
        Release(a, b) => !eval_lasso_at(
            &Until(Rc::new(Not(a.clone())), Rc::new(Not(b.clone()))),
            prefix,
            cycle,
            i,
        )?,
    })
}
