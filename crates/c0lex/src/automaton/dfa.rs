//! Deterministic Finite Automaton (DFA) implementation with partition
//! refinement minimization.

use crate::automaton::config::AutomatonConfig;
use crate::automaton::error::{AutomatonError, Result};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

/// A Deterministic Finite Automaton.
///
/// The transition function is partial: a missing `(state, symbol)` entry
/// means the input is rejected from that state.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    /// Start state (None if empty)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, Symbol), StateId>,
    /// Input alphabet, in the order symbols are explored
    alphabet: IndexSet<Symbol>,
    /// Mapping from DFA states to original NFA states (if created via subset construction)
    state_mapping: Option<HashMap<StateId, Vec<StateId>>>,
    config: AutomatonConfig,
}

impl DFA {
    /// Create a new empty DFA with the default limits.
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    pub fn with_config(config: AutomatonConfig) -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            alphabet: IndexSet::new(),
            state_mapping: None,
            config,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> Result<StateId> {
        if self.num_states as usize >= self.config.max_states {
            warn!(
                "DFA state {} rejected, limit is {} states",
                self.num_states, self.config.max_states
            );
            return Err(AutomatonError::StateLimitExceeded {
                limit: self.config.max_states,
            });
        }
        let id = self.num_states;
        self.num_states += 1;
        Ok(id)
    }

    /// Fail unless `state` was returned by [`DFA::add_state`].
    fn check_state(&self, state: StateId) -> Result<()> {
        if state >= self.num_states {
            warn!(
                "DFA state {state} rejected, only {} states exist",
                self.num_states
            );
            return Err(AutomatonError::UnknownState {
                state,
                num_states: self.num_states,
            });
        }
        Ok(())
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.start_state = Some(state);
        Ok(())
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.final_states.insert(state);
        Ok(())
    }

    /// Register a symbol even if no transition uses it yet.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Add a transition, replacing any previous one for `(source, symbol)`.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: Symbol,
        destination: StateId,
    ) -> Result<()> {
        self.check_state(source)?;
        self.check_state(destination)?;
        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
        Ok(())
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Set the state mapping from original NFA states.
    pub fn set_state_mapping(&mut self, mapping: HashMap<StateId, Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// Get the state mapping.
    pub fn state_mapping(&self) -> Option<&HashMap<StateId, Vec<StateId>>> {
        self.state_mapping.as_ref()
    }

    /// Run the DFA over the bytes of `input`.
    pub fn accepts(&self, input: &str) -> bool {
        self.accepts_symbols(input.as_bytes())
    }

    pub fn accepts_symbols(&self, input: &[Symbol]) -> bool {
        let Some(mut state) = self.start_state else {
            return false;
        };

        for &symbol in input {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.final_states.contains(state)
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.start_state.is_none() || self.final_states.is_empty() {
            return true;
        }

        !self.find_reachable_states().intersects(&self.final_states)
    }

    /// Get all transitions, ordered by source state then alphabet order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        (0..self.num_states).flat_map(move |src| {
            self.alphabet
                .iter()
                .filter_map(move |&sym| self.transition(src, sym).map(|dst| (src, sym, dst)))
        })
    }

    /// Ordered state -> symbol -> destination table for report renderers.
    ///
    /// Every state has an entry, even when it has no outgoing transitions.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<Symbol, StateId>> {
        let mut map: IndexMap<StateId, IndexMap<Symbol, StateId>> =
            (0..self.num_states).map(|s| (s, IndexMap::new())).collect();

        for (src, sym, dst) in self.transitions() {
            map.entry(src).or_default().insert(sym, dst);
        }

        map
    }

    /// Minimize the DFA by iterative partition refinement.
    /// Returns a new minimized DFA.
    ///
    /// States of the result are numbered breadth-first from the start state
    /// in alphabet order, so minimizing twice yields an identical automaton.
    pub fn minimize(&self) -> DFA {
        let Some(start) = self.start_state else {
            return self.empty_like();
        };

        // Unreachable states never take part in the partition
        let reachable = self.find_reachable_states();

        // Initial partition: final states and non-final states
        let final_reachable = self.final_states.intersection(&reachable);
        let non_final_reachable = reachable.difference(&self.final_states);

        let mut partitions: Vec<StateSet> = [final_reachable, non_final_reachable]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        let mut class_of = self.class_map(&partitions);
        let mut rounds = 0;

        loop {
            rounds += 1;

            // Compare every member against the first member of its class,
            // using the partition as it stood at the start of the round.
            let mut splits: Vec<(usize, StateSet)> = Vec::new();
            for (idx, partition) in partitions.iter().enumerate() {
                if partition.len() < 2 {
                    continue;
                }
                let mut members = partition.iter();
                let Some(first) = members.next() else {
                    continue;
                };

                let distinguished: StateSet = members
                    .filter(|&other| self.distinguishable(first, other, &class_of))
                    .collect();
                if !distinguished.is_empty() {
                    splits.push((idx, distinguished));
                }
            }

            if splits.is_empty() {
                break;
            }

            for (idx, moved) in splits {
                partitions[idx] = partitions[idx].difference(&moved);
                partitions.push(moved);
            }
            class_of = self.class_map(&partitions);
        }

        let minimized = self.build_minimized_dfa(&partitions, &class_of, start);
        debug!(
            "minimized DFA from {} to {} states in {rounds} refinement rounds",
            self.num_states, minimized.num_states
        );
        minimized
    }

    /// An automaton with no states that keeps this one's alphabet and limits.
    fn empty_like(&self) -> DFA {
        let mut dfa = DFA::with_config(self.config);
        dfa.alphabet = self.alphabet.clone();
        dfa
    }

    /// Map each state to the index of its partition (None for states outside
    /// every partition, i.e. unreachable ones).
    fn class_map(&self, partitions: &[StateSet]) -> Vec<Option<usize>> {
        let mut class_of = vec![None; self.num_states as usize];
        for (idx, partition) in partitions.iter().enumerate() {
            for state in partition.iter() {
                class_of[state as usize] = Some(idx);
            }
        }
        class_of
    }

    /// Two states are distinguishable when some symbol is defined for only
    /// one of them, or leads both into different classes.
    fn distinguishable(&self, a: StateId, b: StateId, class_of: &[Option<usize>]) -> bool {
        self.alphabet.iter().any(|&symbol| {
            match (self.transition(a, symbol), self.transition(b, symbol)) {
                (None, None) => false,
                (Some(x), Some(y)) => class_of[x as usize] != class_of[y as usize],
                _ => true,
            }
        })
    }

    /// Find all states reachable from the start state.
    fn find_reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Build a minimized DFA from partitions.
    fn build_minimized_dfa(
        &self,
        partitions: &[StateSet],
        class_of: &[Option<usize>],
        start: StateId,
    ) -> DFA {
        let mut minimized = self.empty_like();

        let Some(start_class) = class_of[start as usize] else {
            return minimized;
        };

        // Number classes breadth-first from the start class
        let mut renumber: Vec<Option<StateId>> = vec![None; partitions.len()];
        let mut order: Vec<usize> = Vec::with_capacity(partitions.len());
        let mut queue = VecDeque::new();
        renumber[start_class] = Some(0);
        order.push(start_class);
        queue.push_back(start_class);

        while let Some(class) = queue.pop_front() {
            let Some(representative) = partitions[class].first() else {
                continue;
            };
            for &symbol in &self.alphabet {
                let dest_class = self
                    .transition(representative, symbol)
                    .and_then(|dest| class_of[dest as usize]);
                if let Some(dest_class) = dest_class {
                    if renumber[dest_class].is_none() {
                        renumber[dest_class] = Some(order.len() as StateId);
                        order.push(dest_class);
                        queue.push_back(dest_class);
                    }
                }
            }
        }

        // Never larger than the input, so no limit check is needed
        minimized.num_states = order.len() as StateId;
        minimized.start_state = Some(0);

        // Transitions come from one representative per class; the fixpoint
        // guarantees every member agrees.
        for (new_state, &class) in order.iter().enumerate() {
            let new_state = new_state as StateId;
            let partition = &partitions[class];

            if partition.intersects(&self.final_states) {
                minimized.final_states.insert(new_state);
            }

            let Some(representative) = partition.first() else {
                continue;
            };
            for &symbol in &self.alphabet {
                let dest = self
                    .transition(representative, symbol)
                    .and_then(|dest| class_of[dest as usize])
                    .and_then(|dest_class| renumber[dest_class]);
                if let Some(dest) = dest {
                    minimized.transitions.insert((new_state, symbol), dest);
                }
            }
        }

        // Build state mapping from minimized states to original NFA states
        if let Some(orig_mapping) = &self.state_mapping {
            let mut new_mapping: HashMap<StateId, Vec<StateId>> = HashMap::new();
            for (new_state, &class) in order.iter().enumerate() {
                let mut nfa_states = Vec::new();
                for old_dfa_state in partitions[class].iter() {
                    if let Some(states) = orig_mapping.get(&old_dfa_state) {
                        nfa_states.extend(states.iter().copied());
                    }
                }
                nfa_states.sort_unstable();
                nfa_states.dedup();
                new_mapping.insert(new_state as StateId, nfa_states);
            }
            minimized.state_mapping = Some(new_mapping);
        }

        minimized
    }
}

impl Default for DFA {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimize `dfa`; see [`DFA::minimize`].
pub fn minimize(dfa: &DFA) -> DFA {
    dfa.minimize()
}
