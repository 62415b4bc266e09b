//! Kripke structures: the finite transition systems the model checker
//! verifies LTL formulae against.

use crate::proposition::PropositionId;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A finite-state transition system labelled by atomic propositions.
///
/// Implementations must keep `successors` and `labelling` deterministic per
/// state. The transition relation is expected to be total; a state with no
/// successors is treated as an implicit self-loop everywhere this trait is
/// consumed (tableau-product construction, counterexample reconstruction),
/// so a partial model still yields a well-defined infinite run rather than
/// being rejected outright.
pub trait KripkeStructure {
    type State: Clone + Eq + Hash;

    /// Non-empty for any model a meaningful check can run against.
    fn initial_states(&self) -> HashSet<Self::State>;

    /// All reachable states. May be expensive for large models; callers
    /// that only need reachability from the initial states (as the product
    /// construction does) should prefer `successors` over this.
    fn all_states(&self) -> HashSet<Self::State>;

    /// Successors of `state`. Implementations with genuine dead ends must
    /// return `{state}` rather than the empty set (see trait docs).
    fn successors(&self, state: &Self::State) -> HashSet<Self::State>;

    /// Which atomic propositions hold in `state`.
    fn labelling(&self, state: &Self::State) -> HashSet<PropositionId>;
}

/// A concrete, explicitly enumerated Kripke structure: states indexed by
/// any hashable type, transitions and labels backed by `HashMap`s.
///
/// Ships for convenience (most callers have a handful of named states, not
/// a bespoke `KripkeStructure` impl) and backs the CLI's JSON model format.
#[derive(Debug, Clone)]
pub struct ExplicitKripkeStructure<S> {
    initial: HashSet<S>,
    states: HashSet<S>,
    transitions: HashMap<S, HashSet<S>>,
    labels: HashMap<S, HashSet<PropositionId>>,
}

impl<S: Clone + Eq + Hash> ExplicitKripkeStructure<S> {
    pub fn new() -> Self {
        ExplicitKripkeStructure {
            initial: HashSet::new(),
            states: HashSet::new(),
            transitions: HashMap::new(),
            labels: HashMap::new(),
        }
    }

    pub fn add_state(&mut self, state: S) -> &mut Self {
        self.states.insert(state);
        self
    }

    pub fn add_initial(&mut self, state: S) -> &mut Self {
        self.states.insert(state.clone());
        self.initial.insert(state);
        self
    }

    pub fn add_transition(&mut self, from: S, to: S) -> &mut Self {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions.entry(from).or_default().insert(to);
        self
    }

    pub fn set_labelling(&mut self, state: S, props: impl IntoIterator<Item = PropositionId>) -> &mut Self {
        self.states.insert(state.clone());
        self.labels.insert(state, props.into_iter().collect());
        self
    }
}

impl<S: Clone + Eq + Hash> Default for ExplicitKripkeStructure<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Eq + Hash> KripkeStructure for ExplicitKripkeStructure<S> {
    type State = S;

    fn initial_states(&self) -> HashSet<S> {
        self.initial.clone()
    }

    fn all_states(&self) -> HashSet<S> {
        self.states.clone()
    }

    fn successors(&self, state: &S) -> HashSet<S> {
        match self.transitions.get(state) {
            Some(succs) if !succs.is_empty() => succs.clone(),
            _ => {
                // dead end: implicit self-loop, so the run stays infinite.
                let mut looped = HashSet::new();
                looped.insert(state.clone());
                looped
            }
        }
    }

    fn labelling(&self, state: &S) -> HashSet<PropositionId> {
        self.labels.get(state).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(s: &str) -> PropositionId {
        PropositionId::new(s).unwrap()
    }

    #[test]
    fn dead_end_states_self_loop() {
        let mut model = ExplicitKripkeStructure::new();
        model.add_initial("a");
        // no transitions added for "a" at all
        let succs = model.successors(&"a");
        assert_eq!(succs, HashSet::from(["a"]));
    }

    #[test]
    fn labelling_defaults_to_empty() {
        let model: ExplicitKripkeStructure<&str> = ExplicitKripkeStructure::new();
        assert!(model.labelling(&"unknown").is_empty());
    }

    #[test]
    fn traffic_light_shape() {
        let mut model = ExplicitKripkeStructure::new();
        model
            .add_initial("red")
            .add_transition("red", "green")
            .add_transition("green", "yellow")
            .add_transition("yellow", "red")
            .set_labelling("red", [prop("isRed")])
            .set_labelling("green", [prop("isGreen")])
            .set_labelling("yellow", [prop("isYellow")]);

        assert_eq!(model.successors(&"red"), HashSet::from(["green"]));
        assert_eq!(model.labelling(&"yellow"), HashSet::from([prop("isYellow")]));
    }
}
