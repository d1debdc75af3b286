//! Parsing of raw transition entries such as `A[a-B,C]`.

use crate::automaton::error::AutomatonError;
use crate::automaton::symbol::Symbol;
use std::str::FromStr;

/// One parsed transition entry.
///
/// `A[a-B,C]` reads "from `A` on `a` go to `B` or `C`"; an empty symbol, as in
/// `A[-B]`, is an epsilon transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEntry {
    pub source: String,
    pub symbol: Symbol,
    pub destinations: Vec<String>,
}

impl FromStr for TransitionEntry {
    type Err = AutomatonError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let entry = entry.trim();
        let malformed = |reason| AutomatonError::MalformedTransition {
            entry: entry.to_string(),
            reason,
        };

        let (source, clause) = entry.split_once('[').ok_or_else(|| malformed("missing `[`"))?;
        let source = source.trim();
        if source.is_empty() {
            return Err(malformed("missing source state"));
        }

        let clause = clause
            .strip_suffix(']')
            .ok_or_else(|| malformed("missing closing `]`"))?;
        let (symbol, destinations) = clause
            .split_once('-')
            .ok_or_else(|| malformed("missing `-` between symbol and destinations"))?;
        let symbol = Symbol::parse(symbol)
            .ok_or_else(|| malformed("symbol must be empty or a single character"))?;

        let destinations: Vec<String> = destinations
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect();
        if destinations.is_empty() {
            return Err(malformed("no destination states"));
        }

        Ok(Self {
            source: source.to_string(),
            symbol,
            destinations,
        })
    }
}
