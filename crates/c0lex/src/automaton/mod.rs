//! Finite automata for the identifier pattern.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Epsilon closure and move computation
//! - Subset construction (NFA to DFA conversion)
//! - DFA minimization by partition refinement
//! - Capacity limits that turn runaway construction into errors
//!
//! ```
//! use c0lex::automaton::{build_identifier_nfa, determinize, minimize};
//!
//! let nfa = build_identifier_nfa()?;
//! let dfa = minimize(&determinize(&nfa)?);
//! assert!(dfa.accepts("_count1"));
//! assert!(!dfa.accepts("1count"));
//! # Ok::<(), c0lex::automaton::AutomatonError>(())
//! ```

mod config;
mod dfa;
mod epsilon_nfa;
mod error;
mod identifier;
mod state;
mod subset_construction;
mod symbol;

pub use config::AutomatonConfig;
pub use dfa::{DFA, minimize};
pub use epsilon_nfa::EpsilonNFA;
pub use error::{AutomatonError, Result};
pub use identifier::{
    build_identifier_nfa, build_identifier_nfa_with, digits, identifier_alphabet, letters,
};
pub use state::{StateId, StateSet};
pub use subset_construction::{determinize, subset_construction};
pub use symbol::{Label, Symbol};
