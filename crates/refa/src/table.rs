use serde::{Deserialize, Serialize};

use crate::dfa::Dfa;

// states = rows, 1 additional error state
// symbols = columns, sorted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaTable {
    symbols: Vec<char>,
    data: Vec<usize>,
    accepting: Vec<bool>,
    states: usize,
    initial_state: usize,
}

impl DfaTable {
    fn get_next_state(&self, current_state: usize, column: usize) -> usize {
        self.data[current_state * self.symbols.len() + column]
    }

    fn error_state(&self) -> usize {
        self.states - 1
    }

    /// Dense table for `dfa`. States are renumbered in ascending id order and
    /// missing transitions lead to the trailing error row.
    pub fn from_dfa(dfa: &Dfa) -> DfaTable {
        let order: Vec<usize> = dfa.states().iter().collect();
        let row = |state: usize| {
            order
                .binary_search(&state)
                .expect("DFA transitions stay inside its states")
        };

        let symbols: Vec<char> = dfa.alphabet().iter().copied().collect();
        let num_states = order.len() + 1;
        let num_inputs = symbols.len();
        let mut data: Vec<usize> = vec![num_states - 1; num_states * num_inputs];

        // fill table
        for (i, &state) in order.iter().enumerate() {
            for (column, &c) in symbols.iter().enumerate() {
                if let Some(next) = dfa.next(state, c) {
                    data[i * num_inputs + column] = row(next);
                }
            }
        }

        let mut accepting: Vec<bool> = order
            .iter()
            .map(|&state| dfa.accept_states().contains(state))
            .collect();
        accepting.push(false);

        DfaTable {
            symbols,
            data,
            accepting,
            states: num_states,
            initial_state: row(dfa.start()),
        }
    }

    pub fn num_states(&self) -> usize {
        self.states
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn matches(&self, input: &str) -> bool {
        let mut state = self.initial_state;
        for c in input.chars() {
            let Ok(column) = self.symbols.binary_search(&c) else {
                return false;
            };
            state = self.get_next_state(state, column);
            if state == self.error_state() {
                return false;
            }
        }
        self.accepting[state]
    }
}
