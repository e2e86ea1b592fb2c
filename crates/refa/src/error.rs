use std::path::PathBuf;

use thiserror::Error;

use crate::StateId;

/// Malformed expression text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid regular expression: Unmatched closing parenthesis")]
    UnmatchedClose,
    #[error("Invalid regular expression: Unmatched opening parenthesis")]
    UnmatchedOpen,
    #[error("Invalid regular expression: Misplaced asterisk")]
    MisplacedStar,
    #[error("Invalid regular expression: Consecutive asterisks")]
    DoubledStar,
    #[error("Invalid regular expression: Unknown character '{0}'")]
    UnknownCharacter(char),
}

/// Failure while evaluating a postfix token sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Invalid regex: not enough operands for {operator}")]
    MissingOperands { operator: &'static str },
    #[error("Invalid regex: mismatched operands ({remaining} fragments left)")]
    MismatchedOperands { remaining: usize },
}

/// Malformed automaton text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("missing required section `{0}`")]
    MissingSection(&'static str),
    #[error("section `{section}` expects {expected} field(s), found {found}")]
    FieldCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid state id `{0}`")]
    InvalidState(String),
    #[error("invalid alphabet symbol `{0}`")]
    InvalidSymbol(String),
    #[error("Invalid symbol in transition: {0}")]
    UndeclaredSymbol(String),
    #[error("state {0} is not declared")]
    UnknownState(StateId),
    #[error("a DFA cannot have epsilon transitions")]
    EpsilonInDfa,
    #[error("DFA transition {state} -> {symbol} has {found} targets")]
    MultipleTargets {
        state: StateId,
        symbol: char,
        found: usize,
    },
    #[error("DFA transition {state} -> {symbol} is declared twice with different targets")]
    ConflictingTransition { state: StateId, symbol: char },
    #[error("Invalid transition format: {0}")]
    MalformedTransition(String),
}

/// Failure to obtain expression text from its source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("expression file `{}` not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read expression file: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure produced by the toolkit.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
