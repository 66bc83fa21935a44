//! Lexical analysis for C0, a small C-like language.
//!
//! - [`lexer`] turns source text into a stream of classified tokens.
//! - [`automaton`] builds the identifier pattern as an epsilon-NFA,
//!   determinizes it by subset construction and minimizes the result.

pub mod automaton;
pub mod lexer;
