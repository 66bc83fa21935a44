//! Property-based tests for the identifier automata.
//!
//! The NFA, its subset construction and the minimized DFA must all
//! recognize `[A-Za-z_][A-Za-z0-9_]*` and nothing else.

#![cfg(test)]

use c0lex::automaton::{DFA, EpsilonNFA, build_identifier_nfa, determinize, minimize};
use proptest::prelude::*;

fn pipeline() -> (EpsilonNFA, DFA, DFA) {
    let nfa = build_identifier_nfa().unwrap();
    let dfa = determinize(&nfa).unwrap();
    let minimized = minimize(&dfa);
    (nfa, dfa, minimized)
}

fn is_identifier(word: &[u8]) -> bool {
    match word.split_first() {
        Some((first, rest)) => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_')
        }
        None => false,
    }
}

/// Run the NFA directly, closure by closure.
fn nfa_accepts(nfa: &EpsilonNFA, word: &[u8]) -> bool {
    let Some(start) = nfa.start_state() else {
        return false;
    };
    let mut current = nfa.epsilon_closure(&[start].into_iter().collect());
    for &symbol in word {
        current = nfa.epsilon_closure(&nfa.move_on(&current, symbol));
    }
    current.intersects(nfa.final_states())
}

/// Every word of length `0..=max_len` over `alphabet`.
fn words(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|word: &Vec<u8>| {
                alphabet.iter().map(move |&c| {
                    let mut next = word.clone();
                    next.push(c);
                    next
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

#[test]
fn test_minimized_has_no_more_states() {
    let (_, dfa, minimized) = pipeline();
    assert!(minimized.num_states() <= dfa.num_states());
}

#[test]
fn test_same_language_exhaustive() {
    let (nfa, dfa, minimized) = pipeline();
    // One representative of each symbol class, plus one symbol outside the alphabet
    let sample = [b'a', b'Z', b'_', b'0', b'9', b'-'];

    for word in words(&sample, 5) {
        let expected = is_identifier(&word);
        assert_eq!(nfa_accepts(&nfa, &word), expected, "nfa {word:?}");
        assert_eq!(dfa.accepts_symbols(&word), expected, "dfa {word:?}");
        assert_eq!(minimized.accepts_symbols(&word), expected, "min {word:?}");
    }
}

#[test]
fn test_determinized_is_deterministic() {
    let (_, dfa, _) = pipeline();
    let mut seen = std::collections::HashSet::new();
    for (src, sym, dst) in dfa.transitions() {
        assert!(dst < dfa.num_states());
        assert!(seen.insert((src, sym)), "duplicate edge {src} {sym}");
    }
}

#[test]
fn test_minimize_is_idempotent() {
    let (_, dfa, minimized) = pipeline();
    let twice = minimize(&minimized);
    assert_eq!(twice.num_states(), minimized.num_states());
    assert_eq!(twice.start_state(), minimized.start_state());
    assert_eq!(twice.final_states(), minimized.final_states());
    assert_eq!(twice.to_transition_map(), minimized.to_transition_map());
    assert_eq!(
        minimize(&dfa).to_transition_map(),
        minimized.to_transition_map()
    );
}

proptest! {
    #[test]
    fn prop_accepts_identifiers(word in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
        let (nfa, dfa, minimized) = pipeline();
        prop_assert!(nfa_accepts(&nfa, word.as_bytes()));
        prop_assert!(dfa.accepts(&word));
        prop_assert!(minimized.accepts(&word));
    }

    #[test]
    fn prop_rejects_leading_digit(word in "[0-9][A-Za-z0-9_]{0,16}") {
        let (_, dfa, minimized) = pipeline();
        prop_assert!(!dfa.accepts(&word));
        prop_assert!(!minimized.accepts(&word));
    }

    #[test]
    fn prop_agrees_with_reference(word in "[ -~]{0,12}") {
        let (_, dfa, minimized) = pipeline();
        let expected = is_identifier(word.as_bytes());
        prop_assert_eq!(dfa.accepts(&word), expected);
        prop_assert_eq!(minimized.accepts(&word), expected);
    }
}
