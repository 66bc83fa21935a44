//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::config::AutomatonConfig;
use crate::automaton::error::{AutomatonError, Result};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Label, Symbol};
use indexmap::{IndexMap, IndexSet};
use log::warn;
use std::collections::VecDeque;

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, label) -> set of destination states, in first
    /// insertion order
    transitions: IndexMap<(StateId, Label), StateSet>,
    /// Number of distinct (source, label, destination) edges
    num_transitions: usize,
    /// All symbols used (excluding epsilon), in first use order
    alphabet: IndexSet<Symbol>,
    config: AutomatonConfig,
}

impl EpsilonNFA {
    /// Create a new empty epsilon-NFA with the default limits.
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    pub fn with_config(config: AutomatonConfig) -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::with_capacity(16),
            transitions: IndexMap::new(),
            num_transitions: 0,
            alphabet: IndexSet::new(),
            config,
        }
    }

    /// Fail if `state` could never be allocated under the state limit.
    fn check_state(&self, state: StateId) -> Result<()> {
        if state as usize >= self.config.max_states {
            warn!(
                "NFA state {state} rejected, limit is {} states",
                self.config.max_states
            );
            return Err(AutomatonError::StateLimitExceeded {
                limit: self.config.max_states,
            });
        }
        Ok(())
    }

    /// Ensure a state exists, expanding num_states if needed.
    fn ensure_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        if state >= self.num_states {
            self.num_states = state + 1;
        }
        Ok(())
    }

    /// Allocate a fresh state and return its ID.
    pub fn add_state(&mut self) -> Result<StateId> {
        let id = self.num_states;
        self.ensure_state(id)?;
        Ok(id)
    }

    fn add_labeled_transition(
        &mut self,
        source: StateId,
        label: Label,
        destination: StateId,
    ) -> Result<()> {
        self.check_state(source)?;
        self.check_state(destination)?;

        let exists = self
            .transitions
            .get(&(source, label))
            .is_some_and(|dests| dests.contains(destination));
        if exists {
            return Ok(());
        }
        if self.num_transitions >= self.config.max_transitions {
            warn!(
                "NFA transition {source} -{label}-> {destination} rejected, limit is {}",
                self.config.max_transitions
            );
            return Err(AutomatonError::TransitionLimitExceeded {
                limit: self.config.max_transitions,
            });
        }

        self.ensure_state(source)?;
        self.ensure_state(destination)?;
        if let Some(symbol) = label.symbol() {
            self.alphabet.insert(symbol);
        }

        let capacity = self.num_states as usize;
        self.transitions
            .entry((source, label))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
        self.num_transitions += 1;
        Ok(())
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: Symbol,
        destination: StateId,
    ) -> Result<()> {
        self.add_labeled_transition(source, Label::Symbol(symbol), destination)
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) -> Result<()> {
        self.add_labeled_transition(source, Label::Epsilon, destination)
    }

    pub fn set_start_state(&mut self, state: StateId) -> Result<()> {
        self.ensure_state(state)?;
        self.start_state = Some(state);
        Ok(())
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) -> Result<()> {
        self.ensure_state(state)?;
        self.final_states.insert(state);
        Ok(())
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn num_transitions(&self) -> usize {
        self.num_transitions
    }

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

    /// Get the alphabet (all symbols except epsilon), in first use order.
    pub fn alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Get the epsilon closure of a set of states.
    ///
    /// The result is the smallest superset of `states` closed under epsilon
    /// transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.transitions.get(&(s, Label::Epsilon)) {
                for dest in destinations.iter() {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Get the states reachable from a set of states by exactly one
    /// transition on `symbol`. No epsilon closure is applied.
    pub fn move_on(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, Label::Symbol(symbol))) {
                reached.union_with(destinations);
            }
        }

        reached
    }

    /// Check if the NFA accepts no string at all.
    pub fn is_empty(&self) -> bool {
        let Some(start) = self.start_state else {
            return true;
        };

        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue: VecDeque<StateId> = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            // Label doesn't matter for reachability
            for ((src, _), destinations) in &self.transitions {
                if *src == state {
                    queue.extend(destinations.iter().filter(|d| !visited.contains(*d)));
                }
            }
        }

        true
    }

    /// Get all transitions as an iterator of (source, label, destination).
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Label, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, label), dests)| dests.iter().map(move |dst| (src, label, dst)))
    }

    /// Ordered source -> label -> destinations table for report renderers.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<Label, Vec<StateId>>> {
        let mut map: IndexMap<StateId, IndexMap<Label, Vec<StateId>>> = IndexMap::new();

        for ((src, label), dests) in &self.transitions {
            map.entry(*src)
                .or_default()
                .entry(*label)
                .or_default()
                .extend(dests.iter());
        }

        map.sort_keys();
        map
    }
}

impl Default for EpsilonNFA {
    fn default() -> Self {
        Self::new()
    }
}
