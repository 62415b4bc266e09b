//! End-to-end scenarios against the traffic-light and door models.

use ltl_model_checker::{f, g, x, CheckerConfig, ExplicitKripkeStructure, LtlFormula, LtlModelChecker, ModelCheckResult, PropositionId};

fn prop(name: &str) -> PropositionId {
    PropositionId::new(name).unwrap()
}

fn atom(name: &str) -> LtlFormula<PropositionId> {
    LtlFormula::atomic(prop(name))
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

fn door(locked_can_open: bool) -> ExplicitKripkeStructure<&'static str> {
    let mut model = ExplicitKripkeStructure::new();
    model
        .add_initial("closed")
        .add_transition("closed", "opening")
        .add_transition("closed", "locked")
        .add_transition("opening", "open")
        .add_transition("open", "closing")
        .add_transition("closing", "closed")
        .add_transition("locked", "closed")
        .set_labelling("closed", [prop("isClosed")])
        .set_labelling("open", [prop("isOpen")])
        .set_labelling("locked", [prop("isLocked")]);
    if locked_can_open {
        model.add_transition("locked", "opening");
    }
    model
}

fn checker() -> LtlModelChecker {
    LtlModelChecker::new(CheckerConfig::default())
}

#[test]
fn scenario_a_yellow_implies_next_red_holds() {
    let formula = g(atom("isYellow").implies(x(atom("isRed"))));
    assert!(checker().check(&formula, &traffic_light()).unwrap().holds());
}

#[test]
fn scenario_b_infinitely_often_red_holds() {
    let formula = g(f(atom("isRed")));
    assert!(checker().check(&formula, &traffic_light()).unwrap().holds());
}

#[test]
fn scenario_c_red_implies_next_green_holds() {
    let formula = g(atom("isRed").implies(x(atom("isGreen"))));
    assert!(checker().check(&formula, &traffic_light()).unwrap().holds());
}

#[test]
fn scenario_d_eventually_always_yellow_fails_with_red_green_cycle() {
    let formula = f(g(atom("isYellow")));
    let result = checker().check(&formula, &traffic_light()).unwrap();
    assert!(!result.holds());
    let ModelCheckResult::Fails(ce) = result else {
        panic!("expected a counterexample");
    };
    let visited: Vec<&str> = ce.prefix.iter().chain(ce.cycle.iter()).copied().collect();
    assert!(visited.contains(&"red"));
    assert!(visited.contains(&"green"));
}

#[test]
fn scenario_e_closed_implies_eventually_open_fails_on_locked_door() {
    let formula = g(atom("isClosed").implies(f(atom("isOpen"))));
    let result = checker().check(&formula, &door(false)).unwrap();
    assert!(!result.holds());
    let ModelCheckResult::Fails(ce) = result else {
        panic!("expected a counterexample");
    };
    let all: Vec<&str> = ce.prefix.iter().chain(ce.cycle.iter()).copied().collect();
    assert!(all.contains(&"locked"));
    assert!(!all.contains(&"open"));
}

#[test]
fn scenario_f_holds_once_locked_can_also_open() {
    let formula = g(atom("isClosed").implies(f(atom("isOpen"))));
    let result = checker().check(&formula, &door(true)).unwrap();
    assert!(result.holds());
}
