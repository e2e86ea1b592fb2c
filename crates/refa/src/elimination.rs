// Conversion of an automaton into a regular expression by state elimination.
//
// Both automaton kinds are first adapted into a graph whose edges carry a set
// of alternative expressions. A fresh start node points at the original start
// through an epsilon edge and every original accept state points at a fresh
// accept node the same way. Interior nodes are then removed in ascending id
// order, folding `R_ij L* R_jk` into the `i -> k` edge each time. Each edge is
// joined into a single alternation before folding, so an elimination adds at
// most one alternative per `(i, k)` pair.

use std::collections::{BTreeMap, BTreeSet};

use crate::alphabet::Symbol;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::regex::Regex;
use crate::{StateId, StateSet};

/// Labelled edge view shared by every automaton kind.
pub trait EdgeLabels {
    fn state_set(&self) -> &StateSet;
    fn start_state(&self) -> StateId;
    fn accepting(&self) -> &StateSet;
    fn labeled_edges(&self) -> Vec<(StateId, Symbol, StateId)>;
}

impl EdgeLabels for Nfa {
    fn state_set(&self) -> &StateSet {
        &self.states
    }

    fn start_state(&self) -> StateId {
        self.start
    }

    fn accepting(&self) -> &StateSet {
        &self.accept
    }

    fn labeled_edges(&self) -> Vec<(StateId, Symbol, StateId)> {
        let mut edges = Vec::new();
        for (&state, by_symbol) in &self.transitions {
            for (&symbol, targets) in by_symbol {
                edges.extend(targets.iter().map(|target| (state, symbol, target)));
            }
        }
        edges
    }
}

impl EdgeLabels for Dfa {
    fn state_set(&self) -> &StateSet {
        &self.states
    }

    fn start_state(&self) -> StateId {
        self.start
    }

    fn accepting(&self) -> &StateSet {
        &self.accept
    }

    fn labeled_edges(&self) -> Vec<(StateId, Symbol, StateId)> {
        self.transitions
            .iter()
            .flat_map(|(&state, by_symbol)| {
                by_symbol
                    .iter()
                    .map(move |(&c, &target)| (state, Symbol::Char(c), target))
            })
            .collect()
    }
}

type Alternatives = BTreeSet<String>;

const EPSILON: &str = "ε";

// true when `expr` has a `|` or `*` outside of any parentheses
fn needs_group(expr: &str) -> bool {
    let mut depth: usize = 0;
    for c in expr.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' | '*' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn alternation(exprs: &Alternatives) -> String {
    exprs.iter().map(String::as_str).collect::<Vec<_>>().join("|")
}

// concatenation of the parts, identity parts dropped
fn concat(parts: &[&str]) -> String {
    let mut result = String::new();
    for &part in parts {
        if part.is_empty() || part == EPSILON {
            continue;
        }
        if needs_group(part) {
            result.push('(');
            result.push_str(part);
            result.push(')');
        } else {
            result.push_str(part);
        }
    }

    if result.is_empty() {
        EPSILON.to_owned()
    } else {
        result
    }
}

struct Graph {
    edges: BTreeMap<StateId, BTreeMap<StateId, Alternatives>>,
}

impl Graph {
    fn from_automaton<A: EdgeLabels + ?Sized>(
        automaton: &A,
        start: StateId,
        accept: StateId,
    ) -> Graph {
        let mut graph = Graph {
            edges: BTreeMap::new(),
        };
        for (source, symbol, target) in automaton.labeled_edges() {
            graph.add(source, target, symbol.regex_label());
        }
        graph.add(start, automaton.start_state(), EPSILON.to_owned());
        for state in automaton.accepting() {
            graph.add(state, accept, EPSILON.to_owned());
        }
        graph
    }

    fn add(&mut self, source: StateId, target: StateId, expr: String) {
        self.edges
            .entry(source)
            .or_default()
            .entry(target)
            .or_default()
            .insert(expr);
    }

    fn eliminate(&mut self, j: StateId) {
        let mut outgoing = self.edges.remove(&j).unwrap_or_default();
        let mut self_loop = outgoing.remove(&j).unwrap_or_default();
        // (ε|x)* accepts what (x)* does
        self_loop.remove(EPSILON);
        let loop_expr = if self_loop.is_empty() {
            String::new()
        } else {
            format!("({})*", alternation(&self_loop))
        };

        let incoming: Vec<(StateId, String)> = self
            .edges
            .iter_mut()
            .filter_map(|(&i, targets)| targets.remove(&j).map(|exprs| (i, alternation(&exprs))))
            .collect();
        let outgoing: Vec<(StateId, String)> = outgoing
            .iter()
            .map(|(&k, exprs)| (k, alternation(exprs)))
            .collect();

        for (i, r_ij) in &incoming {
            for (k, r_jk) in &outgoing {
                self.add(*i, *k, concat(&[r_ij.as_str(), loop_expr.as_str(), r_jk.as_str()]));
            }
        }
    }
}

/// Regular expression accepting the same language as `automaton`.
pub fn to_regex<A: EdgeLabels + ?Sized>(automaton: &A) -> Regex {
    let states = automaton.state_set();
    let fresh_start = states.iter().max().map_or(0, |max| max + 1);
    let fresh_accept = fresh_start + 1;

    let mut graph = Graph::from_automaton(automaton, fresh_start, fresh_accept);
    for state in states {
        graph.eliminate(state);
    }
    log::debug!("eliminated {} states", states.len());

    let result = match graph
        .edges
        .get(&fresh_start)
        .and_then(|targets| targets.get(&fresh_accept))
    {
        Some(exprs) if !exprs.is_empty() => alternation(exprs),
        _ => return Regex::empty_language(),
    };

    if result == EPSILON {
        return Regex::new("");
    }
    Regex::new(&result).fix()
}
