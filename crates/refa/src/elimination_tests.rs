use indoc::indoc;

use crate::alphabet::Symbol;
use crate::automaton::FiniteAutomaton;
use crate::dfa::Dfa;
use crate::elimination::{to_regex, EdgeLabels};
use crate::nfa::Nfa;
use crate::regex::Regex;

fn compile_nfa(re_str: &str) -> Nfa {
    Nfa::from_regex(&Regex::new(re_str)).expect("failed to compile regex")
}

fn strings(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| symbols.iter().map(move |&c| format!("{prefix}{c}")))
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

fn assert_same_language(expected: &Nfa, regex: &Regex, re_str: &str) {
    let actual = Nfa::from_regex(regex)
        .unwrap_or_else(|e| panic!("'{}' synthesized invalid regex '{}': {}", re_str, regex, e));
    for input in strings(&['a', 'b', 'c'], 5) {
        assert_eq!(
            expected.simulate(&input),
            actual.simulate(&input),
            "'{}' and synthesized '{}' disagree on '{}'",
            re_str,
            regex,
            input
        );
    }
}

#[test]
fn simple_dfas() {
    let test_vectors = vec![("a", "a"), ("ab", "ab"), ("a|b", "a|b"), ("abc", "abc")];

    for (re_str, expected) in test_vectors {
        let dfa = Dfa::from_regex(&Regex::new(re_str)).unwrap();
        assert_eq!(dfa.to_regex().as_str(), expected, "eliminating '{}'", re_str);
    }
}

#[test]
fn nfa_with_epsilon_edges() {
    let nfa = compile_nfa("ab");
    assert!(nfa
        .labeled_edges()
        .iter()
        .any(|&(_, symbol, _)| symbol == Symbol::Epsilon));
    assert_eq!(to_regex(&nfa).as_str(), "ab");
}

#[test]
fn empty_language() {
    let nfa = compile_nfa("∅");
    let regex = nfa.to_regex();
    assert_eq!(regex, Regex::empty_language());
    assert_same_language(&nfa, &regex, "∅");

    let dfa = Dfa::from_text(indoc! {"
        States: 0 1
        Alphabet: a
        Start: 0
        Accept: 1
    "})
    .unwrap();
    assert_eq!(dfa.to_regex(), Regex::empty_language());
}

#[test]
fn empty_string_collapses_to_empty_literal() {
    let nfa = compile_nfa("ε");
    let regex = nfa.to_regex();
    assert!(regex.is_empty());
    assert_same_language(&nfa, &regex, "ε");
}

#[test]
fn optional_keeps_empty_alternative() {
    let nfa = compile_nfa("a|ε");
    let regex = Dfa::from_nfa(&nfa).to_regex();
    assert!(regex.as_str().contains('ε'), "got '{}'", regex);
    assert_same_language(&nfa, &regex, "a|ε");
}

#[test]
fn self_loops_become_stars() {
    let dfa = Dfa::from_text(indoc! {"
        States: 0
        Alphabet: a b
        Start: 0
        Accept: 0
        0 -> a -> 0
        0 -> b -> 0
    "})
    .unwrap();
    assert_eq!(dfa.to_regex().as_str(), "((a|b)*)");
}

#[test]
fn round_trip_through_dfa() {
    let re_strs = [
        "a(b|c)*",
        "(a|b)*ab",
        "a*",
        "a*|b*",
        "(ab)*(a|ab)(b|ca)*",
        "(a*b|ac)c*",
        "((a|b)c)*",
        "a(b|ε)c",
    ];

    for re_str in re_strs {
        let nfa = compile_nfa(re_str);
        let regex = Dfa::from_nfa(&nfa).to_regex();
        assert_same_language(&nfa, &regex, re_str);
    }
}

#[test]
fn round_trip_through_nfa() {
    for re_str in ["a(b|c)*", "(a|b)*ab", "a*|b*", "(ab)*c"] {
        let nfa = compile_nfa(re_str);
        assert_same_language(&nfa, &nfa.to_regex(), re_str);
    }
}

#[test]
fn round_trip_through_minimized_dfa() {
    for re_str in ["(a|b)*ab", "a(b|c)*", "(ab|ba)*"] {
        let nfa = compile_nfa(re_str);
        let regex = Dfa::from_nfa(&nfa).minimize().to_regex();
        assert_same_language(&nfa, &regex, re_str);
    }
}

#[test]
fn raw_thompson_nfa_stays_compact() {
    let test_vectors = vec![
        ("((ε)*+(ba|(b|b)))*", 1_000),
        ("(ab|ba)*(a|bb)*", 2_000),
        ("((a|b)(b|c))*a", 1_000),
    ];

    for (re_str, bound) in test_vectors {
        let nfa = compile_nfa(re_str);
        let regex = nfa.to_regex();
        assert!(
            regex.as_str().len() < bound,
            "'{}' over {} states synthesized {} bytes",
            re_str,
            nfa.num_states(),
            regex.as_str().len()
        );
        assert_same_language(&nfa, &regex, re_str);
    }
}
