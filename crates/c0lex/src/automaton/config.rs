/// Capacity limits for automaton construction.
///
/// Construction fails with an [`AutomatonError`](super::AutomatonError)
/// instead of truncating once a limit would be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonConfig {
    /// Maximum number of states in an NFA or in a determinized DFA
    pub max_states: usize,

    /// Maximum number of distinct NFA edges
    pub max_transitions: usize,
}

impl AutomatonConfig {
    pub const DEFAULT_MAX_STATES: usize = 100;
    pub const DEFAULT_MAX_TRANSITIONS: usize = 100 * 128;

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn with_max_transitions(mut self, max_transitions: usize) -> Self {
        self.max_transitions = max_transitions;
        self
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            max_states: Self::DEFAULT_MAX_STATES,
            max_transitions: Self::DEFAULT_MAX_TRANSITIONS,
        }
    }
}
