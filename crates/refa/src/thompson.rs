// Thompson construction over a postfix expression.
//
// Every fragment on the stack is an Nfa with its own arena of state ids.
// Combining two fragments copies the second one behind the first with an
// offset of at least `max id + 1`, so merged arenas never collide.

use std::collections::BTreeSet;

use crate::alphabet::Symbol;
use crate::error::ConstructionError;
use crate::nfa::{Nfa, NfaTransitions};
use crate::regex::{Postfix, Token};
use crate::StateSet;

fn fragment(num_states: usize, accept: &[usize]) -> Nfa {
    Nfa {
        states: (0..num_states).collect(),
        alphabet: BTreeSet::new(),
        start: 0,
        accept: accept.iter().copied().collect(),
        transitions: NfaTransitions::new(),
    }
}

// 0 --symbol--> 1
fn symbol_fragment(symbol: Symbol) -> Nfa {
    let mut nfa = fragment(2, &[1]);
    nfa.alphabet.insert(symbol);
    nfa.add_edge(0, symbol, 1);
    nfa
}

// start and accept are never connected
fn empty_set_fragment() -> Nfa {
    fragment(2, &[1])
}

// one state that is both start and accept
fn epsilon_only_fragment() -> Nfa {
    let mut nfa = fragment(1, &[0]);
    nfa.alphabet.insert(Symbol::Epsilon);
    nfa
}

fn concat(left: Nfa, right: &Nfa) -> Nfa {
    let offset = left.max_state() + 1;
    let joins: Vec<usize> = left.accept.iter().collect();

    let mut nfa = left;
    nfa.absorb(right, offset);
    for state in joins {
        nfa.add_edge(state, Symbol::Epsilon, right.start + offset);
    }
    nfa.accept = right.accept.iter().map(|s| s + offset).collect();
    nfa.alphabet.insert(Symbol::Epsilon);
    nfa
}

fn union(left: &Nfa, right: &Nfa) -> Nfa {
    let left_offset = 1;
    let right_offset = left.max_state() + 2;

    let mut nfa = fragment(1, &[]);
    nfa.absorb(left, left_offset);
    nfa.absorb(right, right_offset);
    nfa.add_edge(0, Symbol::Epsilon, left.start + left_offset);
    nfa.add_edge(0, Symbol::Epsilon, right.start + right_offset);

    let mut accept: StateSet = left.accept.iter().map(|s| s + left_offset).collect();
    accept.extend(right.accept.iter().map(|s| s + right_offset));
    nfa.accept = accept;
    nfa.alphabet.insert(Symbol::Epsilon);
    nfa
}

fn star(inner: &Nfa) -> Nfa {
    let offset = 1;
    let inner_start = inner.start + offset;
    let last = inner.max_state() + offset + 1;

    let mut nfa = fragment(1, &[]);
    nfa.absorb(inner, offset);
    nfa.states.insert(last);

    nfa.add_edge(0, Symbol::Epsilon, inner_start);
    nfa.add_edge(0, Symbol::Epsilon, last);
    for state in &inner.accept {
        nfa.add_edge(state + offset, Symbol::Epsilon, inner_start);
        nfa.add_edge(state + offset, Symbol::Epsilon, last);
    }

    nfa.accept = [0, last].into_iter().collect();
    nfa.alphabet.insert(Symbol::Epsilon);
    nfa
}

fn pop(stack: &mut Vec<Nfa>, operator: &'static str) -> Result<Nfa, ConstructionError> {
    stack.pop().ok_or(ConstructionError::MissingOperands { operator })
}

/// Evaluates `postfix` on a stack of fragments and returns the single
/// remaining fragment.
pub(crate) fn build(postfix: &Postfix) -> Result<Nfa, ConstructionError> {
    let mut stack: Vec<Nfa> = Vec::new();

    for &token in postfix {
        match token {
            Token::Symbol(c) => stack.push(symbol_fragment(Symbol::Char(c))),
            Token::Epsilon => stack.push(symbol_fragment(Symbol::Epsilon)),
            Token::EmptySet => stack.push(empty_set_fragment()),
            Token::Concat => {
                let right = pop(&mut stack, "concatenation")?;
                let left = pop(&mut stack, "concatenation")?;
                stack.push(concat(left, &right));
            }
            Token::Union => match stack.len() {
                0 => {
                    log::warn!("union without operands in `{postfix}`, substituting the empty string");
                    stack.push(epsilon_only_fragment());
                }
                1 => {
                    log::warn!("union with a single operand in `{postfix}`, keeping the operand");
                }
                _ => {
                    let right = pop(&mut stack, "union")?;
                    let left = pop(&mut stack, "union")?;
                    stack.push(union(&left, &right));
                }
            },
            Token::Star => {
                let inner = pop(&mut stack, "Kleene star")?;
                stack.push(star(&inner));
            }
        }
    }

    if stack.len() != 1 {
        return Err(ConstructionError::MismatchedOperands {
            remaining: stack.len(),
        });
    }

    let mut nfa = pop(&mut stack, "result")?;
    nfa.alphabet.insert(Symbol::Epsilon);
    log::debug!("built NFA with {} states from `{postfix}`", nfa.num_states());
    Ok(nfa)
}
