//! The LTL formula algebra: an immutable, persistently-shared syntax tree
//! with structural equality/hashing and a concise builder/operator surface.

pub mod normalize;

use std::fmt;
use std::ops::{BitAnd, BitOr, Not as NotOp};
use std::rc::Rc;

/// Bound satisfied by every atomic proposition type used inside an
/// [`LtlFormula`]: formulas need structural equality/hashing to dedupe
/// tableau nodes, and a canonical [`Display`] form for the same purpose.
pub trait Proposition: Clone + Eq + std::hash::Hash + fmt::Debug + fmt::Display {}
impl<T: Clone + Eq + std::hash::Hash + fmt::Debug + fmt::Display> Proposition for T {}

/// An LTL formula over atomic propositions of type `P`.
///
/// Persistent tree: every compound variant holds `Rc`-shared children, so
/// cloning a formula (or a subformula reached during tableau expansion) is
/// O(1) and sharing is safe across threads once the tree is built (no
/// interior mutability anywhere in this type).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LtlFormula<P> {
    BooleanLiteral(bool),
    Atomic(P),
    Not(Rc<LtlFormula<P>>),
    And(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
    Or(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
    Implies(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
    Next(Rc<LtlFormula<P>>),
    Eventually(Rc<LtlFormula<P>>),
    Globally(Rc<LtlFormula<P>>),
    Until(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
    WeakUntil(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
    Release(Rc<LtlFormula<P>>, Rc<LtlFormula<P>>),
}

impl<P> LtlFormula<P> {
    pub fn constant(value: bool) -> Self {
        LtlFormula::BooleanLiteral(value)
    }

    pub fn atomic(prop: P) -> Self {
        LtlFormula::Atomic(prop)
    }

    pub fn not(self) -> Self {
        LtlFormula::Not(Rc::new(self))
    }

    pub fn and(self, other: Self) -> Self {
        LtlFormula::And(Rc::new(self), Rc::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        LtlFormula::Or(Rc::new(self), Rc::new(other))
    }

    pub fn implies(self, other: Self) -> Self {
        LtlFormula::Implies(Rc::new(self), Rc::new(other))
    }

    pub fn next(self) -> Self {
        LtlFormula::Next(Rc::new(self))
    }

    pub fn eventually(self) -> Self {
        LtlFormula::Eventually(Rc::new(self))
    }

    pub fn globally(self) -> Self {
        LtlFormula::Globally(Rc::new(self))
    }

    pub fn until(self, other: Self) -> Self {
        LtlFormula::Until(Rc::new(self), Rc::new(other))
    }

    pub fn weak_until(self, other: Self) -> Self {
        LtlFormula::WeakUntil(Rc::new(self), Rc::new(other))
    }

    pub fn release(self, other: Self) -> Self {
        LtlFormula::Release(Rc::new(self), Rc::new(other))
    }

    /// True for a leaf: a boolean constant or an atomic proposition.
    pub fn is_leaf(&self) -> bool {
        matches!(self, LtlFormula::BooleanLiteral(_) | LtlFormula::Atomic(_))
    }
}

/// Free-function surface syntax, so formulas read close to LTL notation:
/// `g(f(p.clone()))` for `GF p`.
pub fn g<P>(phi: LtlFormula<P>) -> LtlFormula<P> {
    phi.globally()
}
pub fn f<P>(phi: LtlFormula<P>) -> LtlFormula<P> {
    phi.eventually()
}
pub fn x<P>(phi: LtlFormula<P>) -> LtlFormula<P> {
    phi.next()
}
pub fn u<P>(phi: LtlFormula<P>, psi: LtlFormula<P>) -> LtlFormula<P> {
    phi.until(psi)
}
pub fn w<P>(phi: LtlFormula<P>, psi: LtlFormula<P>) -> LtlFormula<P> {
    phi.weak_until(psi)
}
pub fn r<P>(phi: LtlFormula<P>, psi: LtlFormula<P>) -> LtlFormula<P> {
    phi.release(psi)
}

impl<P> NotOp for LtlFormula<P> {
    type Output = LtlFormula<P>;
    fn not(self) -> Self::Output {
        LtlFormula::not(self)
    }
}
impl<P> BitAnd for LtlFormula<P> {
    type Output = LtlFormula<P>;
    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}
impl<P> BitOr for LtlFormula<P> {
    type Output = LtlFormula<P>;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<P: fmt::Display> fmt::Display for LtlFormula<P> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LtlFormula::BooleanLiteral(true) => write!(out, "true"),
            LtlFormula::BooleanLiteral(false) => write!(out, "false"),
            LtlFormula::Atomic(p) => write!(out, "{p}"),
            LtlFormula::Not(a) => write!(out, "(~{a})"),
            LtlFormula::And(a, b) => write!(out, "({a} & {b})"),
            LtlFormula::Or(a, b) => write!(out, "({a} | {b})"),
            LtlFormula::Implies(a, b) => write!(out, "({a} -> {b})"),
            LtlFormula::Next(a) => write!(out, "(X {a})"),
            LtlFormula::Eventually(a) => write!(out, "(F {a})"),
            LtlFormula::Globally(a) => write!(out, "(G {a})"),
            LtlFormula::Until(a, b) => write!(out, "({a} U {b})"),
            LtlFormula::WeakUntil(a, b) => write!(out, "({a} W {b})"),
            LtlFormula::Release(a, b) => write!(out, "({a} R {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> LtlFormula<String> {
        LtlFormula::atomic(name.to_string())
    }

    #[test]
    /// Builders and operator overloads should produce structurally equal trees.
    fn builders_and_operators_agree() {
        let built = g(p("yellow").implies(x(p("red"))));
        let via_ops = g(!p("yellow") | x(p("red")));
        assert_eq!(built, via_ops);
    }

    #[test]
    fn display_renders_readable_infix_form() {
        let formula = g(p("a").implies(x(p("b"))));
        assert_eq!(formula.to_string(), "(G (a -> (X b)))");
    }

    #[test]
    fn structural_equality_requires_proposition_equality() {
        assert_eq!(p("a"), p("a"));
        assert_ne!(p("a"), p("b"));
    }

    #[test]
    fn cloning_is_cheap_and_shares_subtrees() {
        let shared = p("a").and(p("b"));
        let cloned = shared.clone();
        assert_eq!(shared, cloned);
    }
}
