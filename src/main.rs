//! CLI front-end for the LTL model checker.
//!
//! Takes a JSON Kripke structure and a newline-delimited file of LTL
//! formulae, checks each formula against the model, and prints `HOLDS` /
//! `FAILS` plus the counterexample lasso when applicable.

mod formula_parser;

use ltl_model_checker::{CheckerConfig, ExplicitKripkeStructure, LtlModelChecker, ModelCheckResult, PropositionId};

use clap::Parser;
use serde::Deserialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

/// Structure to collect CLI arguments.
#[derive(Parser)]
#[clap(author, version, about = "Explicit-state LTL model checker.")]
struct Arguments {
    /// Path to a JSON file describing the Kripke structure to check against.
    model_path: String,

    /// Path to a file with one LTL formula per line (`#` lines are comments).
    formulae_path: String,

    /// Cap on normalization fixpoint-iteration passes.
    #[clap(long, default_value_t = CheckerConfig::default().max_normalize_passes)]
    max_normalize_passes: usize,

    /// Optional cap on nested-DFS frontier pops before giving up.
    #[clap(long)]
    dfs_bailout_budget: Option<u64>,
}

/// JSON wire format for an [`ExplicitKripkeStructure<String>`].
#[derive(Debug, Deserialize)]
struct ModelFile {
    initial: Vec<String>,
    #[serde(default)]
    transitions: HashMap<String, Vec<String>>,
    #[serde(default)]
    labels: HashMap<String, Vec<String>>,
}

fn load_model(path: &str) -> Result<ExplicitKripkeStructure<String>, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let parsed: ModelFile = serde_json::from_str(&raw).map_err(|e| format!("{path} is not a valid model: {e}"))?;

    let mut model = ExplicitKripkeStructure::new();
    for state in &parsed.initial {
        model.add_initial(state.clone());
    }
    for (from, tos) in &parsed.transitions {
        for to in tos {
            model.add_transition(from.clone(), to.clone());
        }
    }
    for (state, props) in &parsed.labels {
        let ids: Result<Vec<PropositionId>, _> = props.iter().map(PropositionId::new).collect();
        let ids = ids.map_err(|e| format!("invalid proposition label in {path}: {e}"))?;
        model.set_labelling(state.clone(), ids);
    }
    Ok(model)
}

/// Skips blank lines and `#` comments; one formula per remaining line.
fn load_formulae(path: &str) -> Result<Vec<String>, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Arguments::parse();

    if !Path::new(&args.model_path).is_file() {
        eprintln!("{} is not a valid file", args.model_path);
        return ExitCode::FAILURE;
    }
    if !Path::new(&args.formulae_path).is_file() {
        eprintln!("{} is not a valid file", args.formulae_path);
        return ExitCode::FAILURE;
    }

    let model = match load_model(&args.model_path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let formulae_text = match load_formulae(&args.formulae_path) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let checker = LtlModelChecker::new(CheckerConfig {
        max_normalize_passes: args.max_normalize_passes,
        dfs_bailout_budget: args.dfs_bailout_budget,
    });

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut any_failed = false;

    for raw in &formulae_text {
        let formula = match formula_parser::parse(raw) {
            Ok(formula) => formula,
            Err(e) => {
                any_failed = true;
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
                let _ = writeln!(stdout, "PARSE ERROR  {raw}: {e}");
                let _ = stdout.reset();
                continue;
            }
        };

        match checker.check(&formula, &model) {
            Ok(ModelCheckResult::Holds) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(stdout, "HOLDS        {raw}");
                let _ = stdout.reset();
            }
            Ok(ModelCheckResult::Fails(counterexample)) => {
                any_failed = true;
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(stdout, "FAILS        {raw}");
                let _ = stdout.reset();
                println!("             prefix: {:?}", counterexample.prefix);
                println!("             cycle:  {:?}", counterexample.cycle);
            }
            Err(e) => {
                any_failed = true;
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
                let _ = writeln!(stdout, "ERROR        {raw}: {e}");
                let _ = stdout.reset();
            }
        }
    }

    if any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
