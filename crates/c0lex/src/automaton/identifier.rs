//! The identifier automaton: `letter (letter | digit)*` where
//! `letter = [A-Za-z_]` and `digit = [0-9]`.

use crate::automaton::config::AutomatonConfig;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::error::Result;
use crate::automaton::symbol::Symbol;
use std::iter;

/// Symbols that may start an identifier.
pub fn letters() -> impl Iterator<Item = Symbol> + Clone {
    (b'a'..=b'z').chain(b'A'..=b'Z').chain(iter::once(b'_'))
}

pub fn digits() -> impl Iterator<Item = Symbol> + Clone {
    b'0'..=b'9'
}

/// Every symbol the identifier automata read.
pub fn identifier_alphabet() -> impl Iterator<Item = Symbol> + Clone {
    letters().chain(digits())
}

/// Build the identifier NFA with the default limits.
pub fn build_identifier_nfa() -> Result<EpsilonNFA> {
    build_identifier_nfa_with(&AutomatonConfig::default())
}

/// Build the identifier NFA in Thompson form:
///
/// ```text
///  0 --letter--> 1 --ε--> [2] --ε--> 3 --letter--> 4 --ε--> 2
///                          |
///                          +--ε--> 5 --digit---> 6 --ε--> 2
/// ```
///
/// State 0 starts and state 2 accepts.
pub fn build_identifier_nfa_with(config: &AutomatonConfig) -> Result<EpsilonNFA> {
    let mut nfa = EpsilonNFA::with_config(*config);

    let start = nfa.add_state()?;
    let first = nfa.add_state()?;
    let hub = nfa.add_state()?;
    let letter_in = nfa.add_state()?;
    let letter_out = nfa.add_state()?;
    let digit_in = nfa.add_state()?;
    let digit_out = nfa.add_state()?;

    nfa.set_start_state(start)?;
    nfa.add_final_state(hub)?;

    for symbol in letters() {
        nfa.add_transition(start, symbol, first)?;
    }
    nfa.add_epsilon_transition(first, hub)?;

    nfa.add_epsilon_transition(hub, letter_in)?;
    for symbol in letters() {
        nfa.add_transition(letter_in, symbol, letter_out)?;
    }
    nfa.add_epsilon_transition(letter_out, hub)?;

    nfa.add_epsilon_transition(hub, digit_in)?;
    for symbol in digits() {
        nfa.add_transition(digit_in, symbol, digit_out)?;
    }
    nfa.add_epsilon_transition(digit_out, hub)?;

    Ok(nfa)
}
