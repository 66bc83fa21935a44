//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::error::Result;
use crate::automaton::state::{StateId, StateSet};
use indexmap::IndexSet;
use log::{debug, trace};
use std::collections::HashMap;

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// DFA state `i` stands for the `i`-th distinct set of NFA states discovered.
/// Fails without a partial result once the DFA would need more states than
/// the NFA's configured limit.
pub fn subset_construction(nfa: &EpsilonNFA) -> Result<DFA> {
    let mut dfa = DFA::with_config(*nfa.config());
    for &symbol in nfa.alphabet() {
        dfa.add_symbol(symbol);
    }

    let Some(start) = nfa.start_state() else {
        // No start state - return empty DFA
        return Ok(dfa);
    };

    // Each DFA state corresponds to a set of NFA states; the index of the set
    // is the DFA state ID.
    let mut state_sets: IndexSet<StateSet> = IndexSet::new();

    // Unmarked DFA states still to be processed
    let mut worklist: Vec<StateId> = Vec::new();

    let initial_set = nfa.epsilon_closure(&StateSet::singleton(start, nfa.num_states() as usize));
    let initial_dfa_state = dfa.add_state()?;
    dfa.set_start_state(initial_dfa_state)?;
    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state)?;
    }
    trace!("DFA state {initial_dfa_state} = {initial_set:?}");
    state_sets.insert(initial_set);
    worklist.push(initial_dfa_state);

    while let Some(current_dfa_state) = worklist.pop() {
        let Some(current_nfa_set) = state_sets.get_index(current_dfa_state as usize).cloned()
        else {
            continue;
        };

        for &symbol in nfa.alphabet() {
            let moved = nfa.move_on(&current_nfa_set, symbol);
            if moved.is_empty() {
                // No transition on this symbol
                continue;
            }
            let next_nfa_set = nfa.epsilon_closure(&moved);

            let next_dfa_state = match state_sets.get_index_of(&next_nfa_set) {
                Some(existing) => existing as StateId,
                None => {
                    let new_state = dfa.add_state()?;
                    if next_nfa_set.intersects(nfa.final_states()) {
                        dfa.add_final_state(new_state)?;
                    }
                    trace!("DFA state {new_state} = {next_nfa_set:?}");
                    state_sets.insert(next_nfa_set);
                    worklist.push(new_state);
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state)?;
        }
    }

    debug!(
        "determinized NFA with {} states into DFA with {} states",
        nfa.num_states(),
        dfa.num_states()
    );

    // Store the NFA-to-DFA state mapping in the DFA for later use
    let mapping: HashMap<StateId, Vec<StateId>> = state_sets
        .iter()
        .enumerate()
        .map(|(dfa_state, nfa_states)| (dfa_state as StateId, nfa_states.to_vec()))
        .collect();
    dfa.set_state_mapping(mapping);

    Ok(dfa)
}

/// Determinize `nfa`; see [`subset_construction`].
pub fn determinize(nfa: &EpsilonNFA) -> Result<DFA> {
    subset_construction(nfa)
}
