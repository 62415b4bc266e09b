//! Generalized Büchi Automaton construction: the worklist that turns a
//! normalized LTL formula into a finite graph of tableau nodes.

use super::closure::{expand, CanonicalFormula, Literal, TableauNode};
use crate::formula::LtlFormula;
use crate::proposition::PropositionId;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;

type Formula = LtlFormula<PropositionId>;

/// A Generalized Büchi Automaton over `2^AP`: states are indices into
/// `nodes`, transitions are guarded by the source node's literal
/// obligations, and `acceptance` is the family F₁…Fₖ, one set per distinct
/// `Until`/`Eventually` subformula in the closure.
#[derive(Debug, Clone)]
pub struct GeneralizedBuchiAutomaton {
    pub nodes: Vec<TableauNode>,
    pub initial: Vec<usize>,
    pub transitions: Vec<Vec<usize>>,
    pub acceptance: Vec<HashSet<usize>>,
}

impl GeneralizedBuchiAutomaton {
    pub fn state_literals(&self, state: usize) -> Vec<Literal> {
        self.nodes[state].literals()
    }
}

/// Builds the GBA for `formula` (already normalized / in NNF).
pub fn build(formula: &Formula) -> GeneralizedBuchiAutomaton {
    let mut builder = GbaBuilder::default();
    builder.build(formula)
}

#[derive(Default)]
struct GbaBuilder {
    nodes: Vec<TableauNode>,
    index: HashMap<TableauNode, usize>,
    transitions: Vec<Vec<usize>>,
    until_subformulas: BTreeSet<CanonicalFormula>,
    expansion_cache: HashMap<BTreeSet<CanonicalFormula>, Vec<usize>>,
}

impl GbaBuilder {
    fn intern(&mut self, node: TableauNode) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.transitions.push(Vec::new());
        i
    }

    /// Expands `requirements` (a conjunction of obligations a successor
    /// state must satisfy) into the set of tableau node indices that
    /// satisfy it, memoized by the requirement set.
    fn expand_requirements(&mut self, requirements: BTreeSet<CanonicalFormula>) -> Vec<usize> {
        if let Some(cached) = self.expansion_cache.get(&requirements) {
            return cached.clone();
        }
        let new: Vec<Rc<Formula>> = requirements.iter().map(|cf| cf.formula().clone()).collect();
        let mut finished = Vec::new();
        expand(new, BTreeSet::new(), BTreeSet::new(), &mut finished, &mut self.until_subformulas);
        let indices: Vec<usize> = finished.into_iter().map(|node| self.intern(node)).collect();
        self.expansion_cache.insert(requirements, indices.clone());
        indices
    }

    fn build(&mut self, formula: &Formula) -> GeneralizedBuchiAutomaton {
        let root = Rc::new(formula.clone());
        let mut initial_nodes = Vec::new();
        expand(vec![root], BTreeSet::new(), BTreeSet::new(), &mut initial_nodes, &mut self.until_subformulas);
        let initial: Vec<usize> = initial_nodes.into_iter().map(|node| self.intern(node)).collect();

        let mut worklist: VecDeque<usize> = initial.iter().copied().collect();
        let mut queued: HashSet<usize> = initial.iter().copied().collect();

        while let Some(state) = worklist.pop_front() {
            let requirements = self.nodes[state].next.clone();
            let targets = self.expand_requirements(requirements);
            self.transitions[state] = targets.clone();
            for target in targets {
                if queued.insert(target) {
                    worklist.push_back(target);
                }
            }
        }

        let acceptance = self.build_acceptance();

        GeneralizedBuchiAutomaton {
            nodes: std::mem::take(&mut self.nodes),
            initial,
            transitions: std::mem::take(&mut self.transitions),
            acceptance,
        }
    }

    /// One acceptance set per distinct until-like subformula `u = ψ U χ`
    /// (or `F ψ` read as `⊤ U ψ`, right operand `χ = ψ`): the set of
    /// nodes that either don't contain `u` in `old`, or do contain `χ`.
    fn build_acceptance(&self) -> Vec<HashSet<usize>> {
        self.until_subformulas
            .iter()
            .map(|u| {
                let right_operand = match u.formula().as_ref() {
                    LtlFormula::Until(_, b) => CanonicalFormula::new(b.clone()),
                    LtlFormula::Eventually(b) => CanonicalFormula::new(b.clone()),
                    other => unreachable!("until_subformulas only ever holds Until/Eventually, got {other}"),
                };
                self.nodes
                    .iter()
                    .enumerate()
                    .filter(|(_, node)| !node.old.contains(u) || node.old.contains(&right_operand))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect()
    }
}
