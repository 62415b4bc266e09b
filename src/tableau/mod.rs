//! Tableau construction: turns a normalized LTL formula into a
//! Generalized Büchi Automaton.

pub mod closure;
pub mod gba;

pub use closure::{CanonicalFormula, Literal, TableauNode};
pub use gba::{build, GeneralizedBuchiAutomaton};
