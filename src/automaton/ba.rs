//! GBA → BA degeneralization: the layered product that folds an
//! acceptance family F₁…Fₖ into a single acceptance set.

use crate::tableau::{GeneralizedBuchiAutomaton, Literal};
use std::collections::HashSet;

/// A state of the degeneralized automaton: the underlying GBA state paired
/// with the current layer index (`0..layers`).
pub type BaStateId = (usize, usize);

#[derive(Debug, Clone)]
pub struct BuchiAutomaton {
    pub layers: usize,
    pub initial: Vec<BaStateId>,
    pub accepting: HashSet<BaStateId>,
    gba_transitions: Vec<Vec<usize>>,
    gba_literals: Vec<Vec<Literal>>,
    acceptance: Vec<HashSet<usize>>,
}

impl BuchiAutomaton {
    /// Successors of `(q, i)` on reading a world in which `present` holds:
    /// every GBA transition out of `q` whose literal guard is satisfied by
    /// `present`, each paired with the layer the degeneralization moves to.
    pub fn successors(&self, state: BaStateId, present: &HashSet<crate::proposition::PropositionId>) -> Vec<BaStateId> {
        let (q, i) = state;
        if !self.guard_satisfied(q, present) {
            return Vec::new();
        }
        self.gba_transitions[q]
            .iter()
            .map(|&q_next| (q_next, self.next_layer(q, i)))
            .collect()
    }

    fn guard_satisfied(&self, q: usize, present: &HashSet<crate::proposition::PropositionId>) -> bool {
        self.gba_literals[q].iter().all(|lit| match lit {
            Literal::Positive(p) => present.contains(p),
            Literal::Negative(p) => !present.contains(p),
        })
    }

    fn next_layer(&self, q: usize, i: usize) -> usize {
        if self.acceptance[i].contains(&q) {
            (i + 1) % self.layers
        } else {
            i
        }
    }
}

/// Degeneralizes `gba` into a [`BuchiAutomaton`]. When `gba.acceptance` is
/// empty (`k = 0`, no Until/Eventually subformula in the closure), every
/// run trivially satisfies the (vacuous) acceptance family, so this
/// synthesizes a single layer whose acceptance set is all states.
pub fn degeneralize(gba: &GeneralizedBuchiAutomaton) -> BuchiAutomaton {
    let acceptance = if gba.acceptance.is_empty() {
        vec![(0..gba.nodes.len()).collect()]
    } else {
        gba.acceptance.clone()
    };
    let layers = acceptance.len();

    let gba_literals: Vec<Vec<Literal>> = (0..gba.nodes.len()).map(|q| gba.state_literals(q)).collect();

    let initial: Vec<BaStateId> = gba.initial.iter().map(|&q| (q, 0)).collect();
    let accepting: HashSet<BaStateId> = acceptance[0].iter().map(|&q| (q, 0)).collect();

    BuchiAutomaton {
        layers,
        initial,
        accepting,
        gba_transitions: gba.transitions.clone(),
        gba_literals,
        acceptance,
    }
}
