//! Symbol types for automaton transitions.

use std::fmt;

/// A transition key: either a single input character or epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// The empty symbol. Following an epsilon transition consumes no input.
    Epsilon,
    /// A single alphabet character.
    Char(char),
}

/// Special symbol representing epsilon (empty) transitions.
pub const EPSILON: Symbol = Symbol::Epsilon;

impl Symbol {
    /// Parse the symbol portion of a transition entry.
    ///
    /// The empty string is epsilon and a single character is itself. Anything
    /// longer is not a symbol and yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Some(Symbol::Epsilon),
            (Some(c), None) => Some(Symbol::Char(c)),
            _ => None,
        }
    }

    /// Check if this is the epsilon symbol.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        self == EPSILON
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}
