use crate::dfa::Dfa;
use crate::elimination::{self, EdgeLabels};
use crate::error::StructuralError;
use crate::nfa::Nfa;
use crate::regex::Regex;

/// Operations every automaton kind supports. The conversion to a regular
/// expression is written once, against [`EdgeLabels`].
pub trait FiniteAutomaton: EdgeLabels + Sized {
    fn from_text(text: &str) -> Result<Self, StructuralError>;

    fn to_text(&self) -> String;

    fn render(&self) -> String;

    fn simulate(&self, input: &str) -> bool;

    fn to_regex(&self) -> Regex {
        elimination::to_regex(self)
    }
}

impl FiniteAutomaton for Nfa {
    fn from_text(text: &str) -> Result<Self, StructuralError> {
        Nfa::from_text(text)
    }

    fn to_text(&self) -> String {
        Nfa::to_text(self)
    }

    fn render(&self) -> String {
        Nfa::render(self)
    }

    fn simulate(&self, input: &str) -> bool {
        Nfa::simulate(self, input)
    }
}

impl FiniteAutomaton for Dfa {
    fn from_text(text: &str) -> Result<Self, StructuralError> {
        Dfa::from_text(text)
    }

    fn to_text(&self) -> String {
        Dfa::to_text(self)
    }

    fn render(&self) -> String {
        Dfa::render(self)
    }

    fn simulate(&self, input: &str) -> bool {
        Dfa::simulate(self, input)
    }
}
