//! The model-checker facade: orchestrates normalize → negate → normalize
//! → GBA → BA → product + nested DFS.

use crate::automaton::degeneralize;
use crate::config::CheckerConfig;
use crate::error::ModelCheckError;
use crate::formula::normalize::normalize_with_limit;
use crate::formula::LtlFormula;
use crate::kripke::KripkeStructure;
use crate::product::{self, Counterexample};
use crate::proposition::PropositionId;
use crate::tableau;
use std::fmt::Debug;
use std::hash::Hash;

/// The outcome of [`LtlModelChecker::check`]: either the formula holds on
/// every infinite run of the model, or it fails with a concrete lasso
/// witness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCheckResult<S> {
    Holds,
    Fails(Counterexample<S>),
}

impl<S> ModelCheckResult<S> {
    pub fn holds(&self) -> bool {
        matches!(self, ModelCheckResult::Holds)
    }
}

/// Explicit-state LTL model checker. Stateless beyond its [`CheckerConfig`]:
/// each call to `check` is independent and carries no state across calls.
#[derive(Debug, Clone, Default)]
pub struct LtlModelChecker {
    config: CheckerConfig,
}

impl LtlModelChecker {
    pub fn new(config: CheckerConfig) -> Self {
        LtlModelChecker { config }
    }

    /// Decides whether every infinite run of `model` satisfies `formula`.
    ///
    /// Builds the Büchi automaton for `¬normalize(formula)`, computes the
    /// synchronous product with `model`, and runs nested DFS for an
    /// accepting lasso; an accepting lasso is a run of `model` that
    /// violates `formula`, so its *absence* means the formula holds.
    pub fn check<K>(
        &self,
        formula: &LtlFormula<PropositionId>,
        model: &K,
    ) -> Result<ModelCheckResult<K::State>, ModelCheckError>
    where
        K: KripkeStructure,
        K::State: Clone + Eq + Hash + Debug,
    {
        let negated = LtlFormula::not(normalize_with_limit(formula, self.config.max_normalize_passes));
        let negated_normalized = normalize_with_limit(&negated, self.config.max_normalize_passes);
        tracing::debug!(formula = %negated_normalized, "negated formula normalized");

        let gba = tableau::build(&negated_normalized);
        tracing::debug!(states = gba.nodes.len(), acceptance_sets = gba.acceptance.len(), "tableau/GBA built");

        let ba = degeneralize(&gba);
        tracing::debug!(layers = ba.layers, "GBA degeneralized to BA");

        let search = product::find_accepting_lasso_with_budget(model, &ba, self.config.dfs_bailout_budget);
        match search {
            Ok(None) => {
                tracing::info!("no accepting lasso found: formula holds");
                Ok(ModelCheckResult::Holds)
            }
            Ok(Some(counterexample)) => {
                tracing::info!(
                    prefix_len = counterexample.prefix.len(),
                    cycle_len = counterexample.cycle.len(),
                    "accepting lasso found: formula fails"
                );
                Ok(ModelCheckResult::Fails(counterexample))
            }
            Err(product::BailoutExceeded) => {
                tracing::warn!("nested DFS bailout budget exceeded");
                Err(ModelCheckError::internal("cancelled"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{f, g, x, LtlFormula};
    use crate::kripke::ExplicitKripkeStructure;

    fn prop(name: &str) -> PropositionId {
        PropositionId::new(name).unwrap()
    }

    fn traffic_light() -> ExplicitKripkeStructure<&'static str> {
        let mut model = ExplicitKripkeStructure::new();
        model
            .add_initial("red")
            .add_transition("red", "green")
            .add_transition("green", "yellow")
            .add_transition("yellow", "red")
            .set_labelling("red", [prop("isRed")])
            .set_labelling("green", [prop("isGreen")])
            .set_labelling("yellow", [prop("isYellow")]);
        model
    }

    #[test]
    fn scenario_a_yellow_implies_next_red_holds() {
        let checker = LtlModelChecker::default();
        let model = traffic_light();
        let formula = g(LtlFormula::atomic(prop("isYellow")).implies(x(LtlFormula::atomic(prop("isRed")))));
        assert!(checker.check(&formula, &model).unwrap().holds());
    }

    #[test]
    fn scenario_b_infinitely_often_red_holds() {
        let checker = LtlModelChecker::default();
        let model = traffic_light();
        let formula = g(f(LtlFormula::atomic(prop("isRed"))));
        assert!(checker.check(&formula, &model).unwrap().holds());
    }

    #[test]
    fn scenario_d_eventually_always_yellow_fails() {
        let checker = LtlModelChecker::default();
        let model = traffic_light();
        let formula = f(g(LtlFormula::atomic(prop("isYellow"))));
        let result = checker.check(&formula, &model).unwrap();
        assert!(!result.holds());
        if let ModelCheckResult::Fails(ce) = result {
            let visited: Vec<&str> = ce.cycle.clone();
            assert!(visited.contains(&"red"));
            assert!(visited.contains(&"green"));
        }
    }
}
