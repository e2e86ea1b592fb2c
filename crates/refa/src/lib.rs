mod alphabet;
mod automaton;
mod dfa;
mod elimination;
mod error;
mod minimize;
mod nfa;
mod regex;
mod subset;
mod table;
mod text;
mod thompson;

#[cfg(test)]
mod dfa_tests;
#[cfg(test)]
mod elimination_tests;

pub type StateId = usize;
pub type StateSet = bit_set::BitSet;

pub use alphabet::{is_symbol_char, Symbol, EMPTY_SET_GLYPH, EPSILON_GLYPH};
pub use automaton::FiniteAutomaton;
pub use dfa::{Dfa, DfaTransitions};
pub use elimination::{to_regex, EdgeLabels};
pub use error::{ConstructionError, Error, SourceError, StructuralError, SyntaxError};
pub use nfa::{Nfa, NfaTransitions};
pub use regex::{Postfix, Regex, Token};
pub use table::DfaTable;
