//! Tableau nodes and the one-formula-at-a-time expansion that builds them.
//!
//! Builds the classic Gerth/Peled/Vardi/Wolper "expand" tableau: each node
//! is a consistent, fully-decomposed set of obligations (`old`) plus the
//! obligations deferred to the successor state (`next`).

use crate::formula::LtlFormula;
use crate::proposition::PropositionId;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

type Formula = LtlFormula<PropositionId>;

/// An `LtlFormula` paired with its `Display`-rendered canonical string,
/// used as the dedup/equality/ordering key throughout the tableau.
#[derive(Clone, Debug)]
pub struct CanonicalFormula {
    formula: Rc<Formula>,
    canonical: String,
}

impl CanonicalFormula {
    pub fn new(formula: Rc<Formula>) -> Self {
        let canonical = formula.to_string();
        CanonicalFormula { formula, canonical }
    }

    pub fn formula(&self) -> &Rc<Formula> {
        &self.formula
    }
}

impl PartialEq for CanonicalFormula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}
impl Eq for CanonicalFormula {}
impl PartialOrd for CanonicalFormula {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for CanonicalFormula {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}
impl std::hash::Hash for CanonicalFormula {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}
impl fmt::Display for CanonicalFormula {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(out, "{}", self.canonical)
    }
}

/// A tableau node: `old` is the set of obligations that must hold now,
/// `next` is the set deferred to the successor.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableauNode {
    pub old: BTreeSet<CanonicalFormula>,
    pub next: BTreeSet<CanonicalFormula>,
}

impl TableauNode {
    /// The positive/negated atomic obligations in `old` - the alphabet
    /// letters this node's outgoing transitions are guarded by: an edge's
    /// label is the set of atomic propositions obligated by its source
    /// node.
    pub fn literals(&self) -> Vec<Literal> {
        self.old
            .iter()
            .filter_map(|cf| match cf.formula().as_ref() {
                LtlFormula::Atomic(p) => Some(Literal::Positive(p.clone())),
                LtlFormula::Not(inner) => match inner.as_ref() {
                    LtlFormula::Atomic(p) => Some(Literal::Negative(p.clone())),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    /// True iff every literal obligation of this node is satisfied by
    /// `present` (the set of atomic propositions true in some Kripke
    /// state being checked against this node as a transition guard).
    pub fn accepts_label(&self, present: &std::collections::HashSet<PropositionId>) -> bool {
        self.literals().iter().all(|lit| match lit {
            Literal::Positive(p) => present.contains(p),
            Literal::Negative(p) => !present.contains(p),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Positive(PropositionId),
    Negative(PropositionId),
}

/// Expands `new` (unprocessed obligations) into zero or more finished
/// tableau nodes, each pushed to `out`. Also records every `Until`-like
/// subformula encountered (including `Eventually`, rewritten as `⊤ U ψ`)
/// into `until_subformulas`, for acceptance-family construction.
///
/// Branches that become inconsistent (`α` and `¬α` both obligated) are
/// pruned silently - they simply contribute no node, exactly as a tableau
/// construction discards unsatisfiable leaves.
pub fn expand(
    new: Vec<Rc<Formula>>,
    old: BTreeSet<CanonicalFormula>,
    next: BTreeSet<CanonicalFormula>,
    out: &mut Vec<TableauNode>,
    until_subformulas: &mut BTreeSet<CanonicalFormula>,
) {
    let mut new = new;
    let Some(f) = new.pop() else {
        out.push(TableauNode { old, next });
        return;
    };

    let cf = CanonicalFormula::new(f.clone());
    if old.contains(&cf) {
        expand(new, old, next, out, until_subformulas);
        return;
    }

    use LtlFormula::*;
    match f.as_ref() {
        BooleanLiteral(false) => {
            // inconsistent branch: contributes no node.
        }
        BooleanLiteral(true) => {
            expand(new, old, next, out, until_subformulas);
        }
        Atomic(_) => {
            if is_negated_in(&old, &f) {
                return;
            }
            let mut old = old;
            old.insert(cf);
            expand(new, old, next, out, until_subformulas);
        }
        Not(inner) => {
            if is_positive_in(&old, inner) {
                return;
            }
            let mut old = old;
            old.insert(cf);
            expand(new, old, next, out, until_subformulas);
        }
        And(a, b) => {
            let mut old = old;
            old.insert(cf);
            new.push(a.clone());
            new.push(b.clone());
            expand(new, old, next, out, until_subformulas);
        }
        Or(a, b) => {
            let mut old = old;
            old.insert(cf);
            let mut new_a = new.clone();
            new_a.push(a.clone());
            expand(new_a, old.clone(), next.clone(), out, until_subformulas);
            let mut new_b = new;
            new_b.push(b.clone());
            expand(new_b, old, next, out, until_subformulas);
        }
        Implies(_, _) => {
            unreachable!("normalize() eliminates Implies before tableau construction")
        }
        Next(a) => {
            let mut old = old;
            old.insert(cf);
            let mut next = next;
            next.insert(CanonicalFormula::new(a.clone()));
            expand(new, old, next, out, until_subformulas);
        }
        Globally(a) => {
            // G a == a & X(G a)
            let mut old = old;
            old.insert(cf.clone());
            new.push(a.clone());
            let mut next = next;
            next.insert(cf);
            expand(new, old, next, out, until_subformulas);
        }
        Eventually(a) => {
            // F a == a | X(F a); tracked as an until-acceptance obligation
            // via its `⊤ U a` rewriting.
            until_subformulas.insert(cf.clone());
            let mut old = old;
            old.insert(cf.clone());

            let mut new_now = new.clone();
            new_now.push(a.clone());
            expand(new_now, old.clone(), next.clone(), out, until_subformulas);

            let mut next_defer = next;
            next_defer.insert(cf);
            expand(new, old, next_defer, out, until_subformulas);
        }
        Until(a, b) => {
            // a U b == b | (a & X(a U b))
            until_subformulas.insert(cf.clone());
            let mut old = old;
            old.insert(cf.clone());

            let mut new_now = new.clone();
            new_now.push(b.clone());
            expand(new_now, old.clone(), next.clone(), out, until_subformulas);

            let mut new_defer = new;
            new_defer.push(a.clone());
            let mut next_defer = next;
            next_defer.insert(cf);
            expand(new_defer, old, next_defer, out, until_subformulas);
        }
        WeakUntil(a, b) => {
            // a W b == b | (a & X(a W b)); not an acceptance-bearing
            // obligation - weak until can be satisfied by never
            // discharging b, so no acceptance set is generated for it
            // (likewise for G and R).
            let mut old = old;
            old.insert(cf.clone());

            let mut new_now = new.clone();
            new_now.push(b.clone());
            expand(new_now, old.clone(), next.clone(), out, until_subformulas);

            let mut new_defer = new;
            new_defer.push(a.clone());
            let mut next_defer = next;
            next_defer.insert(cf);
            expand(new_defer, old, next_defer, out, until_subformulas);
        }
        Release(a, b) => {
            // a R b == b & (a | X(a R b))
            let mut old = old;
            old.insert(cf.clone());

            // branch 1: a holds now too, obligation discharged.
            let mut new_a = new.clone();
            new_a.push(b.clone());
            new_a.push(a.clone());
            expand(new_a, old.clone(), next.clone(), out, until_subformulas);

            // branch 2: defer, b must hold now regardless.
            let mut new_defer = new;
            new_defer.push(b.clone());
            let mut next_defer = next;
            next_defer.insert(cf);
            expand(new_defer, old, next_defer, out, until_subformulas);
        }
    }
}

fn is_negated_in(old: &BTreeSet<CanonicalFormula>, atomic: &Rc<Formula>) -> bool {
    let negated = LtlFormula::Not(atomic.clone());
    old.iter().any(|cf| cf.formula().as_ref() == &negated)
}

fn is_positive_in(old: &BTreeSet<CanonicalFormula>, inner: &Rc<Formula>) -> bool {
    old.iter().any(|cf| cf.formula() == inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::normalize::normalize;
    use crate::formula::{f, g, LtlFormula};

    fn p(name: &str) -> Formula {
        LtlFormula::atomic(PropositionId::new(name).unwrap())
    }

    #[test]
    fn atomic_formula_yields_single_consistent_node() {
        let formula = normalize(&p("a"));
        let mut out = Vec::new();
        let mut untils = BTreeSet::new();
        expand(vec![Rc::new(formula)], BTreeSet::new(), BTreeSet::new(), &mut out, &mut untils);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].literals(), vec![Literal::Positive(PropositionId::new("a").unwrap())]);
    }

    #[test]
    fn contradiction_prunes_to_no_nodes() {
        let formula = normalize(&p("a").and(LtlFormula::not(p("a"))));
        let mut out = Vec::new();
        let mut untils = BTreeSet::new();
        expand(vec![Rc::new(formula)], BTreeSet::new(), BTreeSet::new(), &mut out, &mut untils);
        assert!(out.is_empty());
    }

    #[test]
    fn disjunction_branches_into_two_nodes() {
        let formula = normalize(&p("a").or(p("b")));
        let mut out = Vec::new();
        let mut untils = BTreeSet::new();
        expand(vec![Rc::new(formula)], BTreeSet::new(), BTreeSet::new(), &mut out, &mut untils);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn globally_defers_itself_to_next() {
        let formula = normalize(&g(p("a")));
        let mut out = Vec::new();
        let mut untils = BTreeSet::new();
        expand(vec![Rc::new(formula.clone())], BTreeSet::new(), BTreeSet::new(), &mut out, &mut untils);
        assert_eq!(out.len(), 1);
        assert!(out[0].next.contains(&CanonicalFormula::new(Rc::new(formula))));
    }

    #[test]
    fn eventually_is_recorded_as_until_obligation() {
        let formula = normalize(&f(p("a")));
        let mut out = Vec::new();
        let mut untils = BTreeSet::new();
        expand(vec![Rc::new(formula)], BTreeSet::new(), BTreeSet::new(), &mut out, &mut untils);
        assert_eq!(untils.len(), 1);
    }
}
