// plain-text automaton format:
//
// States: <ids>
// Alphabet: <symbols>
// Start: <id>
// Accept: <ids>
// <state> -> <symbol> -> <targets>
//
// NFA targets are comma separated and an empty symbol is epsilon.
// DFA lines carry exactly one target.

use std::collections::BTreeSet;
use std::fmt;

use crate::alphabet::{is_symbol_char, Symbol};
use crate::dfa::{Dfa, DfaTransitions};
use crate::error::StructuralError;
use crate::nfa::{Nfa, NfaTransitions};
use crate::{StateId, StateSet};

struct Header {
    states: StateSet,
    alphabet: BTreeSet<char>,
    start: StateId,
    accept: StateSet,
}

fn section<'a>(line: Option<&'a str>, name: &'static str) -> Result<&'a str, StructuralError> {
    let (label, rest) = line
        .and_then(|line| line.split_once(':'))
        .ok_or(StructuralError::MissingSection(name))?;
    if label.trim() != name {
        return Err(StructuralError::MissingSection(name));
    }
    Ok(rest.trim())
}

fn parse_state(token: &str) -> Result<StateId, StructuralError> {
    token
        .trim()
        .parse()
        .map_err(|_| StructuralError::InvalidState(token.trim().to_owned()))
}

fn parse_states(field: &str) -> Result<StateSet, StructuralError> {
    field.split_whitespace().map(parse_state).collect()
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_header<'a, I>(lines: &mut I) -> Result<Header, StructuralError>
where
    I: Iterator<Item = &'a str>,
{
    let states = parse_states(section(lines.next(), "States")?)?;

    let alphabet = section(lines.next(), "Alphabet")?
        .split_whitespace()
        .map(|token| {
            single_char(token)
                .filter(|&c| is_symbol_char(c))
                .ok_or_else(|| StructuralError::InvalidSymbol(token.to_owned()))
        })
        .collect::<Result<BTreeSet<char>, _>>()?;

    let start_fields: Vec<&str> = section(lines.next(), "Start")?.split_whitespace().collect();
    let start = match start_fields.as_slice() {
        [start] => parse_state(start)?,
        fields => {
            return Err(StructuralError::FieldCount {
                section: "Start",
                expected: 1,
                found: fields.len(),
            })
        }
    };

    let accept = parse_states(section(lines.next(), "Accept")?)?;

    Ok(Header {
        states,
        alphabet,
        start,
        accept,
    })
}

// "<state> -> <symbol> -> <targets>"
fn split_transition(line: &str) -> Result<(StateId, &str, &str), StructuralError> {
    let parts: Vec<&str> = line.split("->").collect();
    match parts.as_slice() {
        [state, symbol, targets] => Ok((parse_state(state)?, symbol.trim(), targets.trim())),
        _ => Err(StructuralError::MalformedTransition(line.to_owned())),
    }
}

fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim().lines().map(str::trim)
}

impl Nfa {
    /// Decodes the plain-text NFA format. Repeated `(state, symbol)` lines
    /// accumulate into one target set.
    pub fn from_text(text: &str) -> Result<Nfa, StructuralError> {
        let mut lines = text_lines(text);
        let header = parse_header(&mut lines)?;
        let mut alphabet: BTreeSet<Symbol> =
            header.alphabet.iter().map(|&c| Symbol::Char(c)).collect();

        let mut transitions = NfaTransitions::new();
        for line in lines.filter(|line| !line.is_empty()) {
            let (state, symbol, targets) = split_transition(line)?;
            let symbol = if symbol.is_empty() {
                alphabet.insert(Symbol::Epsilon);
                Symbol::Epsilon
            } else {
                single_char(symbol)
                    .filter(|c| header.alphabet.contains(c))
                    .map(Symbol::Char)
                    .ok_or_else(|| StructuralError::UndeclaredSymbol(symbol.to_owned()))?
            };

            let targets = targets
                .split(',')
                .map(parse_state)
                .collect::<Result<StateSet, _>>()?;
            transitions
                .entry(state)
                .or_default()
                .entry(symbol)
                .or_default()
                .union_with(&targets);
        }

        Nfa::new(header.states, alphabet, header.start, header.accept, transitions)
    }

    pub fn to_text(&self) -> String {
        let alphabet = self.alphabet.iter().filter_map(|s| s.as_char());
        let mut lines = header_text(&self.states, alphabet, self.start, &self.accept);
        for (state, edges) in &self.transitions {
            // an empty target list has no encoding, the edge is simply absent
            for (symbol, targets) in edges.iter().filter(|(_, t)| !t.is_empty()) {
                let targets = join(targets.iter(), ",");
                lines.push(format!("{state} -> {symbol} -> {targets}"));
            }
        }
        lines.join("\n")
    }

    /// Human-readable listing for inspection, sorted by state then symbol.
    pub fn render(&self) -> String {
        let alphabet = self.alphabet.iter().map(|s| s.regex_label());
        let mut lines = render_header("NFA", &self.states, alphabet, self.start, &self.accept);
        for (state, edges) in &self.transitions {
            for (symbol, targets) in edges.iter().filter(|(_, t)| !t.is_empty()) {
                let label = symbol.regex_label();
                let targets = join(targets.iter(), ", ");
                lines.push(format!("  {state} --({label})--> {{{targets}}}"));
            }
        }
        lines.join("\n")
    }
}

impl Dfa {
    pub fn from_text(text: &str) -> Result<Dfa, StructuralError> {
        let mut lines = text_lines(text);
        let header = parse_header(&mut lines)?;

        let mut transitions = DfaTransitions::new();
        for line in lines.filter(|line| !line.is_empty()) {
            let (state, symbol, targets) = split_transition(line)?;
            if symbol.is_empty() {
                return Err(StructuralError::EpsilonInDfa);
            }
            let symbol = single_char(symbol)
                .filter(|c| header.alphabet.contains(c))
                .ok_or_else(|| StructuralError::UndeclaredSymbol(symbol.to_owned()))?;

            let targets: Vec<&str> = targets.split(',').collect();
            let target = match targets.as_slice() {
                [target] => parse_state(target)?,
                _ => {
                    return Err(StructuralError::MultipleTargets {
                        state,
                        symbol,
                        found: targets.len(),
                    })
                }
            };

            let edges = transitions.entry(state).or_default();
            match edges.insert(symbol, target) {
                Some(previous) if previous != target => {
                    return Err(StructuralError::ConflictingTransition { state, symbol })
                }
                _ => {}
            }
        }

        Dfa::new(header.states, header.alphabet, header.start, header.accept, transitions)
    }

    pub fn to_text(&self) -> String {
        let alphabet = self.alphabet.iter().copied();
        let mut lines = header_text(&self.states, alphabet, self.start, &self.accept);
        for (state, edges) in &self.transitions {
            for (symbol, target) in edges {
                lines.push(format!("{state} -> {symbol} -> {target}"));
            }
        }
        lines.join("\n")
    }

    /// Same listing as [`Nfa::render`], one target per line.
    pub fn render(&self) -> String {
        let alphabet = self.alphabet.iter().map(char::to_string);
        let mut lines = render_header("DFA", &self.states, alphabet, self.start, &self.accept);
        for (state, edges) in &self.transitions {
            for (symbol, target) in edges {
                lines.push(format!("  {state} --({symbol})--> {target}"));
            }
        }
        lines.join("\n")
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>, separator: &str) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(separator)
}

fn header_text(
    states: &StateSet,
    alphabet: impl Iterator<Item = char>,
    start: StateId,
    accept: &StateSet,
) -> Vec<String> {
    vec![
        format!("States: {}", join(states.iter(), " ")),
        format!("Alphabet: {}", join(alphabet, " ")),
        format!("Start: {start}"),
        format!("Accept: {}", join(accept.iter(), " ")),
    ]
}

fn render_header(
    kind: &str,
    states: &StateSet,
    alphabet: impl Iterator<Item = String>,
    start: StateId,
    accept: &StateSet,
) -> Vec<String> {
    vec![
        format!("{kind} Information:"),
        format!("Alphabet: [{}]", join(alphabet, ", ")),
        format!("States: [{}]", join(states.iter(), ", ")),
        format!("Start State: {start}"),
        format!("Accept States: [{}]", join(accept.iter(), ", ")),
        "Transitions:".to_owned(),
    ]
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
