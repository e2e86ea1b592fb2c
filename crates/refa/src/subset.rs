use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use crate::alphabet::Symbol;
use crate::dfa::{Dfa, DfaTransitions};
use crate::nfa::Nfa;
use crate::{StateId, StateSet};

// union of the closures of every direct successor of `set` on `symbol`
fn successor(nfa: &Nfa, closures: &[StateSet], set: &StateSet, symbol: char) -> StateSet {
    let mut next = StateSet::new();
    for target in &nfa.step(set, Symbol::Char(symbol)) {
        next.union_with(&closures[target]);
    }
    next
}

// creates a DFA from an NFA using subset construction
// DFA ids follow discovery order: the start closure is 0 and the worklist is a stack
pub(crate) fn determinize(nfa: &Nfa) -> Dfa {
    let alphabet: BTreeSet<char> = nfa.alphabet.iter().filter_map(|s| s.as_char()).collect();
    let closures = nfa.epsilon_closures();

    let initial = closures[nfa.start].clone();

    // configuration -> id
    let mut subsets: HashMap<StateSet, StateId> = HashMap::new();
    subsets.insert(initial.clone(), 0);

    let mut worklist: Vec<StateSet> = vec![initial];
    let mut transitions = DfaTransitions::new();
    let mut accept = StateSet::new();

    while let Some(current) = worklist.pop() {
        let id = subsets[&current];
        if !current.is_disjoint(&nfa.accept) {
            accept.insert(id);
        }

        for &symbol in &alphabet {
            let next = successor(nfa, &closures, &current, symbol);
            if next.is_empty() {
                continue;
            }

            let fresh = subsets.len();
            let next_id = match subsets.entry(next) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    worklist.push(entry.key().clone());
                    *entry.insert(fresh)
                }
            };
            transitions.entry(id).or_default().insert(symbol, next_id);
        }
    }

    log::debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        subsets.len()
    );

    Dfa {
        states: (0..subsets.len()).collect(),
        alphabet,
        start: 0,
        accept,
        transitions,
    }
}
