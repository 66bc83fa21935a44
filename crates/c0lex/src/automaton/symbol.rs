//! Symbol types for automata transitions.

use std::fmt;

/// An input symbol: a single ASCII byte.
pub type Symbol = u8;

/// The label on an NFA edge.
///
/// `Epsilon` edges are followed without consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Symbol(Symbol),
    Epsilon,
}

impl Label {
    /// Check if this is an epsilon label.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The consumed symbol, or `None` for epsilon.
    #[inline]
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Label::Symbol(symbol) => Some(symbol),
            Label::Epsilon => None,
        }
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        Label::Symbol(symbol)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Label::Symbol(symbol) if symbol.is_ascii_graphic() => write!(f, "'{}'", symbol as char),
            Label::Symbol(symbol) => write!(f, "ASCII:{symbol}"),
            Label::Epsilon => f.write_str("ε"),
        }
    }
}
