use std::collections::{BTreeMap, BTreeSet};

use indoc::indoc;

use crate::dfa::Dfa;
use crate::error::StructuralError;
use crate::regex::Regex;
use crate::table::DfaTable;
use crate::StateSet;

fn compile_regex(re_str: &str) -> Dfa {
    Dfa::from_regex(&Regex::new(re_str)).expect("failed to compile regex")
}

fn states(ids: &[usize]) -> StateSet {
    ids.iter().copied().collect()
}

fn run_vectors(tests: &[(&str, bool)], dfa: &Dfa, re_str: &str) {
    for (test, expected_result) in tests {
        let result = dfa.simulate(test);
        assert_eq!(
            result, *expected_result,
            "'{}' failed on input '{}', expect match: {}, actual match: {}",
            re_str, test, expected_result, result
        );
    }
}

// every string over `symbols` up to `max_len` characters
fn strings(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for &c in symbols {
                let mut s = prefix.clone();
                s.push(c);
                next.push(s);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

#[test]
fn subset_construction_numbering() {
    let dfa = compile_regex("ab");
    assert_eq!(dfa.states(), &states(&[0, 1, 2]));
    assert_eq!(dfa.start(), 0);
    assert_eq!(dfa.accept_states(), &states(&[2]));
    assert_eq!(dfa.next(0, 'a'), Some(1));
    assert_eq!(dfa.next(0, 'b'), None);
    assert_eq!(dfa.next(1, 'b'), Some(2));
    assert_eq!(dfa.alphabet(), &BTreeSet::from(['a', 'b']));
}

#[test]
fn simulate_vectors() {
    let re_str = "a(b|c)*";
    let dfa = compile_regex(re_str);
    let tests = [
        ("a", true),
        ("abc", true),
        ("acbcb", true),
        ("b", false),
        ("cab", false),
        ("", false),
        ("ad", false),
    ];
    run_vectors(&tests, &dfa, re_str);

    let re_str = "(ab)*(a|ab)(b|ca)*";
    let dfa = compile_regex(re_str);
    let tests = [
        ("a", true),
        ("ab", true),
        ("abab", true),
        ("ababca", true),
        ("abca", true),
        ("", false),
        ("ba", false),
    ];
    run_vectors(&tests, &dfa, re_str);
}

#[test]
fn agrees_with_nfa() {
    let re_strs = ["(a|b)*ab", "a*|b*", "(a*b|ac)c*", "(ab|ε)c", "a(b|c)*"];
    let inputs = strings(&['a', 'b', 'c'], 5);

    for re_str in re_strs {
        let nfa = crate::nfa::Nfa::from_regex(&Regex::new(re_str)).unwrap();
        let dfa = Dfa::from_nfa(&nfa);
        for input in &inputs {
            assert_eq!(
                nfa.simulate(input),
                dfa.simulate(input),
                "'{}' disagrees on '{}'",
                re_str,
                input
            );
        }
    }
}

#[test]
fn empty_language() {
    let dfa = compile_regex("∅");
    assert!(dfa.alphabet().is_empty());
    assert!(dfa.accept_states().is_empty());
    assert!(!dfa.simulate(""));
    assert!(dfa.is_complete());

    let complement = dfa.complement();
    assert!(complement.simulate(""));
    assert!(!complement.simulate("a"));
}

#[test]
fn new_validates_states() {
    let transitions = BTreeMap::from([(0, BTreeMap::from([('a', 4)]))]);
    let result = Dfa::new(
        states(&[0, 1]),
        BTreeSet::from(['a']),
        0,
        states(&[1]),
        transitions,
    );
    assert_eq!(result, Err(StructuralError::UnknownState(4)));

    let result = Dfa::new(states(&[0]), BTreeSet::new(), 2, StateSet::new(), BTreeMap::new());
    assert_eq!(result, Err(StructuralError::UnknownState(2)));
}

#[test]
fn make_complete_adds_trap() {
    let dfa = compile_regex("ab");
    assert!(!dfa.is_complete());

    let complete = dfa.make_complete();
    assert!(complete.is_complete());
    assert_eq!(complete.states(), &states(&[0, 1, 2, 3]));
    assert_eq!(complete.next(0, 'b'), Some(3));
    assert_eq!(complete.next(2, 'a'), Some(3));
    assert_eq!(complete.next(3, 'a'), Some(3));
    assert_eq!(complete.next(3, 'b'), Some(3));
    assert!(!complete.accept_states().contains(3));

    // already complete input is returned as is
    assert_eq!(complete.make_complete(), complete);

    for input in strings(&['a', 'b'], 4) {
        assert_eq!(dfa.simulate(&input), complete.simulate(&input));
    }
}

#[test]
fn complement() {
    let re_str = "ab";
    let dfa = compile_regex(re_str);
    let complement = dfa.complement();
    assert!(complement.is_complete());
    run_vectors(
        &[
            ("", true),
            ("a", true),
            ("b", true),
            ("ba", true),
            ("abb", true),
            ("ab", false),
            ("ax", false),
        ],
        &complement,
        re_str,
    );

    let double = complement.complement();
    for input in strings(&['a', 'b'], 4) {
        assert_ne!(dfa.simulate(&input), complement.simulate(&input), "'{}'", input);
        assert_eq!(dfa.simulate(&input), double.simulate(&input), "'{}'", input);
    }
}

#[test]
fn minimize_merges_equivalent_states() {
    let re_str = "(a|b)*ab";
    let dfa = compile_regex(re_str);
    let minimized = dfa.minimize();

    assert_eq!(minimized.num_states(), 3);
    assert!(minimized.num_states() <= dfa.make_complete().num_states());
    assert!(minimized.is_complete());
    run_vectors(
        &[
            ("ab", true),
            ("aaab", true),
            ("bab", true),
            ("a", false),
            ("ba", false),
            ("", false),
        ],
        &minimized,
        re_str,
    );

    for input in strings(&['a', 'b'], 6) {
        assert_eq!(dfa.simulate(&input), minimized.simulate(&input), "'{}'", input);
    }
}

#[test]
fn minimize_sizes() {
    let test_vectors = vec![("a*", 1), ("a|b", 3), ("ab", 4), ("(a|b)*", 1), ("∅", 1)];

    for (re_str, expected) in test_vectors {
        let minimized = compile_regex(re_str).minimize();
        assert_eq!(minimized.num_states(), expected, "minimizing '{}'", re_str);
    }
}

#[test]
fn minimize_is_idempotent() {
    for re_str in ["(a|b)*ab", "(ab)*(a|ab)(b|ca)*", "a(b|c)*"] {
        let once = compile_regex(re_str).minimize();
        let twice = once.minimize();
        assert_eq!(once.num_states(), twice.num_states(), "'{}'", re_str);
    }
}

#[test]
fn minimize_classes() {
    let (minimized, classes) = compile_regex("ab").minimize_with_classes();
    assert_eq!(minimized.num_states(), 4);
    assert_eq!(classes.len(), 4);
    let distinct: BTreeSet<usize> = classes.values().copied().collect();
    assert_eq!(distinct.len(), 4);
}

#[test]
fn minimize_drops_unreachable_states() {
    let dfa = Dfa::from_text(indoc! {"
        States: 0 1 2 3
        Alphabet: a
        Start: 0
        Accept: 1 3
        0 -> a -> 1
        1 -> a -> 1
        2 -> a -> 3
        3 -> a -> 1
    "})
    .unwrap();

    let (minimized, classes) = dfa.minimize_with_classes();
    assert!(!classes.contains_key(&2));
    assert!(!classes.contains_key(&3));
    assert_eq!(minimized.num_states(), 2);
    run_vectors(&[("", false), ("a", true), ("aaa", true)], &minimized, "aa*");
}

#[test]
fn table_agrees_with_simulation() {
    for re_str in ["(a|b)*ab", "a(b|c)*", "ab"] {
        let dfa = compile_regex(re_str);
        let table = DfaTable::from_dfa(&dfa);
        assert_eq!(table.num_states(), dfa.num_states() + 1);
        for input in strings(&['a', 'b', 'c', 'd'], 4) {
            assert_eq!(
                dfa.simulate(&input),
                table.matches(&input),
                "'{}' disagrees on '{}'",
                re_str,
                input
            );
        }
    }
}

#[test]
fn table_serializes() {
    let table = DfaTable::from_dfa(&compile_regex("a(b|c)*").minimize());
    let json = serde_json::to_string(&table).unwrap();
    let restored: DfaTable = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, table);
    assert!(restored.matches("abcb"));
    assert_eq!(restored.symbols(), &['a', 'b', 'c']);
}
