use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, StructuralError};
use crate::nfa::Nfa;
use crate::regex::Regex;
use crate::{subset, StateId, StateSet};

pub type DfaTransitions = BTreeMap<StateId, BTreeMap<char, StateId>>;

/// Deterministic finite automaton. A missing transition is an implicit
/// rejection, so a DFA may be partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: StateSet,
    pub(crate) alphabet: BTreeSet<char>,
    pub(crate) start: StateId,
    pub(crate) accept: StateSet,
    pub(crate) transitions: DfaTransitions,
}

impl Dfa {
    pub fn new(
        states: StateSet,
        alphabet: BTreeSet<char>,
        start: StateId,
        accept: StateSet,
        transitions: DfaTransitions,
    ) -> Result<Dfa, StructuralError> {
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
            for (symbol, &target) in edges {
                if !alphabet.contains(symbol) {
                    return Err(StructuralError::UndeclaredSymbol(symbol.to_string()));
                }
                declared(target)?;
            }
        }

        Ok(Dfa {
            states,
            alphabet,
            start,
            accept,
            transitions,
        })
    }

    /// Determinizes `nfa` with the subset construction.
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        subset::determinize(nfa)
    }

    pub fn from_regex(regex: &Regex) -> Result<Dfa, Error> {
        let nfa = Nfa::from_regex(regex)?;
        Ok(Self::from_nfa(&nfa))
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept_states(&self) -> &StateSet {
        &self.accept
    }

    pub fn transitions(&self) -> &DfaTransitions {
        &self.transitions
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn next(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&state)?.get(&symbol).copied()
    }

    pub(crate) fn max_state(&self) -> StateId {
        self.states.iter().max().unwrap_or(0)
    }

    pub fn simulate(&self, input: &str) -> bool {
        let mut state = self.start;
        for c in input.chars() {
            if !self.alphabet.contains(&c) {
                return false;
            }
            match self.next(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.accept.contains(state)
    }

    pub fn reachable(&self) -> StateSet {
        let mut reachable = StateSet::new();
        let mut stack = vec![self.start];

        while let Some(state) = stack.pop() {
            if !reachable.insert(state) {
                continue;
            }
            if let Some(edges) = self.transitions.get(&state) {
                stack.extend(edges.values().copied().filter(|t| !reachable.contains(*t)));
            }
        }

        reachable
    }

    /// True when every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.states.iter().all(|state| {
            self.transitions
                .get(&state)
                .map_or(self.alphabet.is_empty(), |edges| {
                    self.alphabet.iter().all(|c| edges.contains_key(c))
                })
        })
    }

    /// Total version of this DFA. Missing transitions are sent to one fresh
    /// trap state that loops on every symbol and never accepts.
    pub fn make_complete(&self) -> Dfa {
        if self.is_complete() {
            return self.clone();
        }

        let trap = self.max_state() + 1;
        let mut complete = self.clone();
        complete.states.insert(trap);

        for state in &complete.states {
            let edges = complete.transitions.entry(state).or_default();
            for &c in &complete.alphabet {
                edges.entry(c).or_insert(trap);
            }
        }

        log::debug!("completed DFA with trap state {trap}");
        complete
    }

    /// DFA accepting exactly the strings over the alphabet this one rejects.
    pub fn complement(&self) -> Dfa {
        let mut complement = self.make_complete();
        let mut accept = complement.states.clone();
        accept.difference_with(&complement.accept);
        complement.accept = accept;
        complement
    }
}
