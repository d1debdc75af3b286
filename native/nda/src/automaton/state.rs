//! State types for automata.

use crate::automaton::symbol::{EPSILON, Symbol};
use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use std::fmt;

/// A state identifier: the dense, positional index of a state.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set for efficiency.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Insert a state into the set. Returns true if it was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            false
        } else {
            self.bits.contains(idx)
        }
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

/// A single automaton state and its outgoing transitions.
///
/// Destinations are kept as state labels in the order they were listed, so
/// the recognizer explores nondeterministic choices left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    id: StateId,
    label: String,
    /// Transitions: symbol -> destination labels
    transitions: IndexMap<Symbol, Vec<String>>,
}

impl State {
    /// Create a state with no transitions.
    pub fn new(id: StateId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            transitions: IndexMap::new(),
        }
    }

    /// Get the state id.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Get the state label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Register the destinations reached on `symbol`, replacing any previous
    /// registration for the same symbol.
    pub fn add_transition<I, S>(&mut self, symbol: Symbol, destinations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let destinations = destinations
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .collect();
        self.transitions.insert(symbol, destinations);
    }

    /// Get the destination labels mapped to exactly `symbol`.
    pub fn transitions_for(&self, symbol: Symbol) -> Option<&[String]> {
        self.transitions.get(&symbol).map(Vec::as_slice)
    }

    /// Check if the state has an epsilon transition.
    pub fn has_epsilon(&self) -> bool {
        self.transitions.contains_key(&EPSILON)
    }

    /// Get the epsilon destinations, or an empty slice.
    pub fn epsilon_transitions(&self) -> &[String] {
        self.transitions_for(EPSILON).unwrap_or_default()
    }

    /// Iterate over all transitions in registration order.
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, &[String])> + '_ {
        self.transitions
            .iter()
            .map(|(&symbol, destinations)| (symbol, destinations.as_slice()))
    }
}
