//! Synchronous product of a Kripke structure with a Büchi automaton, and
//! the nested-DFS search for an accepting lasso.
//!
//! Transition convention: a product transition `(s, q) -> (s', q')`
//! requires `s -> s'` in the model and a BA transition `q -> q'` whose
//! literal guard is satisfied by `labelling(s)` - the label of the state
//! being *left*, matching the tableau's own convention that an edge's guard
//! is drawn from its source node's obligations. Initial product states
//! therefore need no extra filtering: `(s0, q0)` is valid whenever `s0` is
//! an initial model state and `q0` an initial BA state; the guard is first
//! consulted on the product's first outgoing transition.
//!
//! Both DFS passes are implemented iteratively with explicit `Vec`-backed
//! stacks rather than native recursion, to keep stack growth bounded on
//! large product graphs.

use crate::automaton::{BaStateId, BuchiAutomaton};
use crate::kripke::KripkeStructure;
use std::collections::HashSet;
use std::hash::Hash;

/// A lasso-shaped counterexample: the infinite trace `prefix · cycle^ω`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterexample<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

type ProductState<S> = (S, BaStateId);

struct OuterFrame<S> {
    state: ProductState<S>,
    successors: Vec<ProductState<S>>,
    next_child: usize,
}

/// Searches for an accepting lasso in the product of `model` and `ba`.
/// Returns `None` iff the product's accepting language is empty, i.e. the
/// original formula holds on `model`.
pub fn find_accepting_lasso<K>(model: &K, ba: &BuchiAutomaton) -> Option<Counterexample<K::State>>
where
    K: KripkeStructure,
    K::State: Eq + Hash,
{
    find_accepting_lasso_with_budget(model, ba, None)
        .expect("unbounded search (budget=None) never reports bailout")
}

/// Signals that the optional DFS-frontier bailout budget was exhausted
/// before the search could conclude either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BailoutExceeded;

/// Like [`find_accepting_lasso`], but stops and returns
/// [`BailoutExceeded`] once more than `budget` outer-DFS frontier pops have
/// happened, when `budget` is `Some` (a cooperative cancellation point,
/// see `CheckerConfig::dfs_bailout_budget`).
pub fn find_accepting_lasso_with_budget<K>(
    model: &K,
    ba: &BuchiAutomaton,
    budget: Option<u64>,
) -> Result<Option<Counterexample<K::State>>, BailoutExceeded>
where
    K: KripkeStructure,
    K::State: Eq + Hash,
{
    if ba.initial.is_empty() {
        return Ok(None);
    }
    let mut frontier_pops: u64 = 0;

    let successors_of = |state: &ProductState<K::State>| -> Vec<ProductState<K::State>> {
        let (s, q) = state;
        let label = model.labelling(s);
        model
            .successors(s)
            .into_iter()
            .flat_map(|s_next| {
                ba.successors(*q, &label)
                    .into_iter()
                    .map(move |q_next| (s_next.clone(), q_next))
            })
            .collect()
    };

    let mut outer_visited: HashSet<ProductState<K::State>> = HashSet::new();
    let mut stack: Vec<OuterFrame<K::State>> = Vec::new();

    for s0 in model.initial_states() {
        for &q0 in &ba.initial {
            let root: ProductState<K::State> = (s0.clone(), q0);
            if outer_visited.contains(&root) {
                continue;
            }
            outer_visited.insert(root.clone());
            stack.push(OuterFrame {
                successors: successors_of(&root),
                state: root,
                next_child: 0,
            });

            while let Some(frame) = stack.last_mut() {
                if frame.next_child < frame.successors.len() {
                    let child = frame.successors[frame.next_child].clone();
                    frame.next_child += 1;
                    if outer_visited.insert(child.clone()) {
                        stack.push(OuterFrame {
                            successors: successors_of(&child),
                            state: child,
                            next_child: 0,
                        });
                    }
                } else {
                    frontier_pops += 1;
                    if let Some(limit) = budget {
                        if frontier_pops > limit {
                            return Err(BailoutExceeded);
                        }
                    }
                    let completed = stack.pop().unwrap();
                    if ba.accepting.contains(&completed.state.1) {
                        if let Some(cycle) = find_cycle(&completed.state, &successors_of) {
                            // `cycle` already starts at `completed.state` (the loop
                            // head), so the remaining stack - not `completed.state`
                            // itself - is the prefix; pushing it again here would
                            // duplicate the loop head across the prefix/cycle seam.
                            let prefix: Vec<ProductState<K::State>> =
                                stack.iter().map(|f| f.state.clone()).collect();
                            return Ok(Some(build_counterexample(prefix, cycle)));
                        }
                    }
                }
            }
        }
    }

    Ok(None)
}

/// Inner DFS: searches for a path from `target` back to itself, reachable
/// entirely through product states. Returns the path including `target` at
/// both ends (the duplicate is trimmed by the caller when building the
/// counterexample).
fn find_cycle<S, F>(target: &ProductState<S>, successors_of: &F) -> Option<Vec<ProductState<S>>>
where
    S: Clone + Eq + Hash,
    F: Fn(&ProductState<S>) -> Vec<ProductState<S>>,
{
    struct InnerFrame<S> {
        successors: Vec<ProductState<S>>,
        next_child: usize,
    }

    let mut inner_visited: HashSet<ProductState<S>> = HashSet::new();
    inner_visited.insert(target.clone());
    let mut path: Vec<ProductState<S>> = vec![target.clone()];
    let mut stack: Vec<InnerFrame<S>> = vec![InnerFrame {
        successors: successors_of(target),
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.next_child < frame.successors.len() {
            let child = frame.successors[frame.next_child].clone();
            frame.next_child += 1;
            if &child == target {
                path.push(child);
                return Some(path);
            }
            if inner_visited.insert(child.clone()) {
                path.push(child.clone());
                stack.push(InnerFrame {
                    successors: successors_of(&child),
                    next_child: 0,
                });
            }
        } else {
            stack.pop();
            path.pop();
        }
    }

    None
}

/// Projects an outer-DFS path and an inner-DFS cycle onto Kripke states,
/// trimming the boundary duplicate so the repeated state is listed exactly
/// once, at the seam between prefix and cycle.
fn build_counterexample<S: Clone>(prefix: Vec<ProductState<S>>, cycle: Vec<ProductState<S>>) -> Counterexample<S> {
    let prefix_states: Vec<S> = prefix.into_iter().map(|(s, _)| s).collect();
    let mut cycle_states: Vec<S> = cycle.into_iter().map(|(s, _)| s).collect();
    cycle_states.pop(); // drop the trailing duplicate of the cycle's start state
    Counterexample {
        prefix: prefix_states,
        cycle: cycle_states,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::degeneralize;
    use crate::formula::normalize::normalize;
    use crate::formula::{f, g, LtlFormula};
    use crate::kripke::ExplicitKripkeStructure;
    use crate::proposition::PropositionId;
    use crate::tableau::build;

    fn p(name: &str) -> LtlFormula<PropositionId> {
        LtlFormula::atomic(PropositionId::new(name).unwrap())
    }

    fn traffic_light() -> ExplicitKripkeStructure<&'static str> {
        let mut model = ExplicitKripkeStructure::new();
        model
            .add_initial("red")
            .add_transition("red", "green")
            .add_transition("green", "yellow")
            .add_transition("yellow", "red")
            .set_labelling("red", [PropositionId::new("isRed").unwrap()])
            .set_labelling("green", [PropositionId::new("isGreen").unwrap()])
            .set_labelling("yellow", [PropositionId::new("isYellow").unwrap()]);
        model
    }

    #[test]
    fn globally_false_has_a_reachable_accepting_cycle() {
        // BA(¬ G false) = BA(F true) trivially accepts every run; a
        // genuinely finite model always has a reachable lasso.
        let model = traffic_light();
        let negated = normalize(&LtlFormula::not(g(LtlFormula::constant(false))));
        let ba = degeneralize(&build(&negated));
        assert!(find_accepting_lasso(&model, &ba).is_some());
    }

    #[test]
    fn unsatisfiable_negation_has_no_accepting_lasso() {
        let model = traffic_light();
        let negated = normalize(&LtlFormula::not(LtlFormula::constant(true)));
        let ba = degeneralize(&build(&negated));
        assert!(find_accepting_lasso(&model, &ba).is_none());
    }

    #[test]
    fn counterexample_cycle_visits_red_and_green_for_f_g_yellow() {
        // Scenario D: F G isYellow fails on the traffic light; BA(¬(F G
        // isYellow)) = BA(G F ¬isYellow) accepts the red/green/yellow loop.
        let model = traffic_light();
        let not_yellow = LtlFormula::not(p("isYellow"));
        let formula = g(f(not_yellow));
        let ba = degeneralize(&build(&normalize(&formula)));
        let ce = find_accepting_lasso(&model, &ba).expect("must find a counterexample");
        let all_states: Vec<&str> = ce.prefix.iter().chain(ce.cycle.iter()).copied().collect();
        assert!(all_states.contains(&"red"));
        assert!(!ce.cycle.is_empty());
    }

    #[test]
    fn counterexample_lasso_is_a_genuine_path_with_no_duplicated_loop_head() {
        // None of red/green/yellow self-loop, so if the loop head were
        // duplicated across the prefix/cycle seam (prefix.last() == cycle[0])
        // the lasso would require a nonexistent self-transition.
        let model = traffic_light();
        let not_yellow = LtlFormula::not(p("isYellow"));
        let formula = g(f(not_yellow));
        let ba = degeneralize(&build(&normalize(&formula)));
        let ce = find_accepting_lasso(&model, &ba).expect("must find a counterexample");

        if let Some(last_prefix) = ce.prefix.last() {
            assert_ne!(
                *last_prefix,
                ce.cycle[0],
                "loop head must not be duplicated at the prefix/cycle seam"
            );
        }

        let lasso: Vec<&str> = ce
            .prefix
            .iter()
            .chain(ce.cycle.iter())
            .chain(ce.cycle.first())
            .copied()
            .collect();
        for window in lasso.windows(2) {
            let (from, to) = (window[0], window[1]);
            assert!(
                model.successors(&from).contains(&to),
                "{from} -> {to} is not a transition of the model"
            );
        }
    }
}
