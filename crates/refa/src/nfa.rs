use std::collections::{BTreeMap, BTreeSet};

use crate::alphabet::Symbol;
use crate::error::{ConstructionError, Error, StructuralError};
use crate::regex::{Postfix, Regex, Token};
use crate::{thompson, StateId, StateSet};

pub type NfaTransitions = BTreeMap<StateId, BTreeMap<Symbol, StateSet>>;

/// Nondeterministic finite automaton, possibly with epsilon transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: StateSet,
    pub(crate) alphabet: BTreeSet<Symbol>,
    pub(crate) start: StateId,
    pub(crate) accept: StateSet,
    pub(crate) transitions: NfaTransitions,
}

impl Nfa {
    /// Builds an NFA from its parts, checking that the start state, the
    /// accept states and every transition endpoint are declared states and
    /// every transition symbol is in the alphabet.
    pub fn new(
        states: StateSet,
        mut alphabet: BTreeSet<Symbol>,
        start: StateId,
        accept: StateSet,
        transitions: NfaTransitions,
    ) -> Result<Nfa, StructuralError> {
        let declared = |state: StateId| {
            if states.contains(state) {
                Ok(())
            } else {
                Err(StructuralError::UnknownState(state))
            }
        };

        declared(start)?;
        accept.iter().try_for_each(declared)?;
        for (&state, edges) in &transitions {
            declared(state)?;
            for (symbol, targets) in edges {
                match symbol {
                    Symbol::Epsilon => {
                        alphabet.insert(Symbol::Epsilon);
                    }
                    Symbol::Char(c) if !alphabet.contains(symbol) => {
                        return Err(StructuralError::UndeclaredSymbol(c.to_string()));
                    }
                    Symbol::Char(_) => {}
                }
                targets.iter().try_for_each(declared)?;
            }
        }

        Ok(Nfa {
            states,
            alphabet,
            start,
            accept,
            transitions,
        })
    }

    /// Compiles `regex` through postfix conversion and Thompson construction.
    /// The empty expression denotes the empty string.
    pub fn from_regex(regex: &Regex) -> Result<Nfa, Error> {
        let mut postfix = regex.to_postfix()?;
        if postfix.is_empty() {
            postfix = Postfix::from(vec![Token::Epsilon]);
        }
        Ok(Self::from_postfix(&postfix)?)
    }

    pub fn from_postfix(postfix: &Postfix) -> Result<Nfa, ConstructionError> {
        thompson::build(postfix)
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept_states(&self) -> &StateSet {
        &self.accept
    }

    pub fn transitions(&self) -> &NfaTransitions {
        &self.transitions
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn targets(&self, state: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&state)?.get(&symbol)
    }

    pub(crate) fn max_state(&self) -> StateId {
        self.states.iter().max().unwrap_or(0)
    }

    pub(crate) fn add_edge(&mut self, source: StateId, symbol: Symbol, target: StateId) {
        self.transitions
            .entry(source)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(target);
    }

    /// Copies every state and transition of `other` into `self`, renumbered
    /// by `offset`. The caller picks an offset above `self.max_state()` so the
    /// two arenas never share an id. Accept states are left to the caller.
    pub(crate) fn absorb(&mut self, other: &Nfa, offset: StateId) {
        self.states.extend(other.states.iter().map(|s| s + offset));
        self.alphabet.extend(other.alphabet.iter().copied());
        for (&state, edges) in &other.transitions {
            for (&symbol, targets) in edges {
                for target in targets {
                    self.add_edge(state + offset, symbol, target + offset);
                }
            }
        }
    }

    /// States reachable from `set` through zero or more epsilon edges.
    pub fn epsilon_closure(&self, set: &StateSet) -> StateSet {
        let mut closure = set.clone();
        let mut stack: Vec<StateId> = set.iter().collect();

        while let Some(state) = stack.pop() {
            if let Some(targets) = self.targets(state, Symbol::Epsilon) {
                for next in targets {
                    if closure.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        closure
    }

    /// Epsilon closure of every state, indexed by state id. Undeclared ids
    /// below the largest state get an empty closure.
    pub fn epsilon_closures(&self) -> Vec<StateSet> {
        let mut closures = vec![StateSet::new(); self.max_state() + 1];
        for state in &self.states {
            let mut single = StateSet::with_capacity(state + 1);
            single.insert(state);
            closures[state] = self.epsilon_closure(&single);
        }
        closures
    }

    /// Direct successors of `set` on `symbol`, without any closure.
    pub fn step(&self, set: &StateSet, symbol: Symbol) -> StateSet {
        let mut result = StateSet::new();
        for state in set {
            if let Some(targets) = self.targets(state, symbol) {
                result.union_with(targets);
            }
        }
        result
    }

    pub fn simulate(&self, input: &str) -> bool {
        let mut start = StateSet::new();
        start.insert(self.start);
        let mut current = self.epsilon_closure(&start);

        for c in input.chars() {
            let symbol = Symbol::Char(c);
            if !self.alphabet.contains(&symbol) {
                return false;
            }
            current = self.epsilon_closure(&self.step(&current, symbol));
        }

        !current.is_disjoint(&self.accept)
    }

    /// Equivalent NFA over the same states without epsilon edges.
    pub fn eliminate_epsilon(&self) -> Nfa {
        let closures = self.epsilon_closures();
        let alphabet: BTreeSet<Symbol> = self
            .alphabet
            .iter()
            .copied()
            .filter(|s| !s.is_epsilon())
            .collect();

        let mut transitions = NfaTransitions::new();
        let mut accept = StateSet::new();
        for state in &self.states {
            let closure = &closures[state];
            for &symbol in &alphabet {
                let targets = self.step(closure, symbol);
                if !targets.is_empty() {
                    transitions.entry(state).or_default().insert(symbol, targets);
                }
            }
            if !closure.is_disjoint(&self.accept) {
                accept.insert(state);
            }
        }

        Nfa {
            states: self.states.clone(),
            alphabet,
            start: self.start,
            accept,
            transitions,
        }
    }

    /// States reachable from the start state along any edge.
    pub fn reachable(&self) -> StateSet {
        let mut reachable = StateSet::new();
        let mut stack = vec![self.start];

        while let Some(state) = stack.pop() {
            if !reachable.insert(state) {
                continue;
            }
            if let Some(edges) = self.transitions.get(&state) {
                for targets in edges.values() {
                    stack.extend(targets.iter().filter(|t| !reachable.contains(*t)));
                }
            }
        }

        reachable
    }

    /// States from which some accept state can be reached.
    pub fn productive(&self) -> StateSet {
        let mut productive = self.accept.clone();
        let mut changed = true;

        while changed {
            changed = false;
            for state in &self.states {
                if productive.contains(state) {
                    continue;
                }
                let leads_somewhere = self.transitions.get(&state).is_some_and(|edges| {
                    edges.values().any(|targets| !targets.is_disjoint(&productive))
                });
                if leads_somewhere {
                    productive.insert(state);
                    changed = true;
                }
            }
        }

        productive
    }

    /// Removes every state that is unreachable or cannot reach an accept
    /// state. Epsilon edges are eliminated first. The start state is always
    /// kept, even when the language is empty.
    pub fn prune(&self) -> Nfa {
        let base = if self.alphabet.contains(&Symbol::Epsilon) {
            self.eliminate_epsilon()
        } else {
            self.clone()
        };

        let mut useful: StateSet = base.reachable();
        useful.intersect_with(&base.productive());

        let mut transitions = NfaTransitions::new();
        for (&state, edges) in &base.transitions {
            if !useful.contains(state) {
                continue;
            }
            for (&symbol, targets) in edges {
                let mut live = targets.clone();
                live.intersect_with(&useful);
                if !live.is_empty() {
                    transitions.entry(state).or_default().insert(symbol, live);
                }
            }
        }

        let mut accept = base.accept.clone();
        accept.intersect_with(&useful);

        let mut states = useful;
        states.insert(base.start);

        log::debug!(
            "pruned NFA from {} to {} states",
            self.num_states(),
            states.len()
        );

        Nfa {
            states,
            alphabet: base.alphabet,
            start: base.start,
            accept,
            transitions,
        }
    }
}
