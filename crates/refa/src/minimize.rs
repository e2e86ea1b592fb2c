// DFA minimization by reverse table filling.
//
// Pairs with different acceptance are marked first. Every newly marked pair
// (u, v) then marks each pair (r, s) with r --c--> u and s --c--> v, until
// nothing changes. Unmarked pairs are equivalent.

use std::collections::{BTreeMap, VecDeque};

use bit_set::BitSet;

use crate::dfa::{Dfa, DfaTransitions};
use crate::{StateId, StateSet};

impl Dfa {
    /// Minimal DFA for the same language.
    pub fn minimize(&self) -> Dfa {
        self.minimize_with_classes().0
    }

    /// Minimal DFA together with the class every reachable state of the
    /// completed input was merged into. Unreachable states have no class.
    pub fn minimize_with_classes(&self) -> (Dfa, BTreeMap<StateId, StateId>) {
        let dfa = self.make_complete();

        // dense indices in ascending state order
        let order: Vec<StateId> = dfa.states.iter().collect();
        let index = |state: StateId| {
            order
                .binary_search(&state)
                .expect("complete DFA transitions stay inside its states")
        };
        let symbols: Vec<char> = dfa.alphabet.iter().copied().collect();
        let n = order.len();

        let reachable = dfa.reachable();

        // per symbol: target -> sources
        let mut inverse: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); n]; symbols.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::with_capacity(symbols.len()); n];
        for (i, &state) in order.iter().enumerate() {
            for (k, &c) in symbols.iter().enumerate() {
                let target = index(
                    dfa.next(state, c)
                        .expect("complete DFA has a transition on every symbol"),
                );
                inverse[k][target].push(i);
                successors[i].push(target);
            }
        }

        let accepting: Vec<bool> = order.iter().map(|&s| dfa.accept.contains(s)).collect();
        let mut marked: Vec<BitSet> = vec![BitSet::with_capacity(n); n];
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if accepting[i] != accepting[j] {
                    marked[i].insert(j);
                    marked[j].insert(i);
                    queue.push_back((i, j));
                }
            }
        }

        while let Some((u, v)) = queue.pop_front() {
            for sources in &inverse {
                for &r in &sources[u] {
                    for &s in &sources[v] {
                        if !marked[r].contains(s) {
                            marked[r].insert(s);
                            marked[s].insert(r);
                            queue.push_back((r, s));
                        }
                    }
                }
            }
        }

        // a state joins the first class whose representative it is not
        // distinguishable from
        let mut class: Vec<Option<usize>> = vec![None; n];
        let mut representatives: Vec<usize> = Vec::new();
        for i in (0..n).filter(|&i| reachable.contains(order[i])) {
            let found = representatives
                .iter()
                .position(|&rep| !marked[i].contains(rep));
            class[i] = Some(found.unwrap_or_else(|| {
                representatives.push(i);
                representatives.len() - 1
            }));
        }

        let class_of = |i: usize| class[i].expect("successor of a reachable state is reachable");

        let mut transitions = DfaTransitions::new();
        for (id, &rep) in representatives.iter().enumerate() {
            let edges = transitions.entry(id).or_default();
            for (k, &c) in symbols.iter().enumerate() {
                edges.insert(c, class_of(successors[rep][k]));
            }
        }

        let accept: StateSet = (0..n)
            .filter(|&i| accepting[i] && class[i].is_some())
            .map(class_of)
            .collect();

        let classes: BTreeMap<StateId, StateId> = (0..n)
            .filter_map(|i| class[i].map(|c| (order[i], c)))
            .collect();

        log::debug!(
            "minimized DFA: {} states ({} reachable) -> {} classes",
            n,
            reachable.len(),
            representatives.len()
        );

        let minimized = Dfa {
            states: (0..representatives.len()).collect(),
            alphabet: dfa.alphabet.clone(),
            start: class_of(index(dfa.start)),
            accept,
            transitions,
        };
        (minimized, classes)
    }
}
