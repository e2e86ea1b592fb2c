mod cli;

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use refa::{Dfa, DfaTable, EdgeLabels, FiniteAutomaton, Nfa, Regex, EPSILON_GLYPH};

use crate::cli::{Cli, Command, DfaArgs, ExprArgs, Format, Kind};

fn load_regex(expr: &ExprArgs) -> Result<Regex> {
    Regex::from_source(&expr.source)
        .with_context(|| format!("failed to load expression `{}`", expr.source))
}

fn build_nfa(expr: &ExprArgs) -> Result<Nfa> {
    let regex = load_regex(expr)?;
    Nfa::from_regex(&regex).with_context(|| format!("failed to compile `{regex}`"))
}

fn build_dfa(expr: &ExprArgs, transform: DfaArgs) -> Result<Dfa> {
    let mut dfa = Dfa::from_nfa(&build_nfa(expr)?);
    if transform.complement {
        dfa = dfa.complement();
    }
    if transform.minimize {
        dfa = dfa.minimize();
    }
    if transform.complete {
        dfa = dfa.make_complete();
    }
    Ok(dfa)
}

fn format_automaton<A: FiniteAutomaton>(automaton: &A, format: Format) -> String {
    match format {
        Format::Text => automaton.to_text(),
        Format::Render => automaton.render(),
    }
}

fn print_regex(regex: &Regex) {
    if regex.is_empty() {
        println!("{EPSILON_GLYPH}");
    } else {
        println!("{regex}");
    }
}

// accepting states are drawn with a double-parenthesized label
fn to_graph<A: EdgeLabels>(automaton: &A) -> DiGraph<String, String> {
    let mut graph = DiGraph::new();
    let mut nodes = BTreeMap::new();

    for state in automaton.state_set() {
        let label = if automaton.accepting().contains(state) {
            format!("(({state}))")
        } else {
            state.to_string()
        };
        nodes.insert(state, graph.add_node(label));
    }

    for (source, symbol, target) in automaton.labeled_edges() {
        let label = symbol
            .as_char()
            .map_or_else(|| EPSILON_GLYPH.to_string(), |c| c.to_string());
        graph.add_edge(nodes[&source], nodes[&target], label);
    }

    graph
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Postfix { expr } => {
            let regex = load_regex(&expr)?;
            let postfix = regex
                .to_postfix()
                .with_context(|| format!("failed to parse `{regex}`"))?;
            println!("{postfix}");
        }
        Command::Nfa {
            expr,
            no_epsilon,
            prune,
            format,
        } => {
            let mut nfa = build_nfa(&expr)?;
            if prune {
                nfa = nfa.prune();
            } else if no_epsilon {
                nfa = nfa.eliminate_epsilon();
            }
            println!("{}", format_automaton(&nfa, format));
        }
        Command::Dfa {
            expr,
            transform,
            format,
        } => {
            let dfa = build_dfa(&expr, transform)?;
            println!("{}", format_automaton(&dfa, format));
        }
        Command::Match {
            expr,
            inputs,
            transform,
        } => {
            let dfa = build_dfa(&expr, transform)?;
            for input in &inputs {
                let verdict = if dfa.simulate(input) { "accept" } else { "reject" };
                println!("{input:?}: {verdict}");
            }
        }
        Command::Regex { path, kind } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let regex = match kind {
                Kind::Nfa => Nfa::from_text(&text).map(|nfa| nfa.to_regex()),
                Kind::Dfa => Dfa::from_text(&text).map(|dfa| dfa.to_regex()),
            }
            .with_context(|| format!("failed to decode {}", path.display()))?;
            print_regex(&regex);
        }
        Command::Dot {
            expr,
            kind,
            transform,
        } => {
            let graph = match kind {
                Kind::Nfa => to_graph(&build_nfa(&expr)?),
                Kind::Dfa => to_graph(&build_dfa(&expr, transform)?),
            };
            println!("{}", Dot::new(&graph));
        }
        Command::Table { expr, pretty } => {
            let dfa = build_dfa(
                &expr,
                DfaArgs {
                    minimize: true,
                    complement: false,
                    complete: false,
                },
            )?;
            let table = DfaTable::from_dfa(&dfa);
            let json = if pretty {
                serde_json::to_string_pretty(&table)?
            } else {
                serde_json::to_string(&table)?
            };
            println!("{json}");
        }
    }

    Ok(())
}
