//! Büchi automata: the single-acceptance-set degeneralization of a GBA.

pub mod ba;

pub use ba::{degeneralize, BaStateId, BuchiAutomaton};
