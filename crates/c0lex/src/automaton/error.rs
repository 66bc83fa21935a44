use crate::automaton::state::StateId;
use thiserror::Error;

/// Errors raised while building automata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("automaton exceeds the state limit of {limit}")]
    StateLimitExceeded { limit: usize },

    #[error("automaton exceeds the transition limit of {limit}")]
    TransitionLimitExceeded { limit: usize },

    #[error("state {state} does not exist, the automaton has {num_states} states")]
    UnknownState { state: StateId, num_states: StateId },
}

pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;
