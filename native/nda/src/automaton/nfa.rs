//! Non-deterministic automaton with epsilon transitions.

use crate::automaton::error::AutomatonError;
use crate::automaton::state::{State, StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::automaton::transition::TransitionEntry;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;

/// A non-deterministic finite automaton.
///
/// Built once through the setup calls, in order: [`add_states`],
/// [`add_alphabet`], [`add_transition`], [`set_initial`] and [`add_finals`].
/// Afterwards it is only read, by any number of [`recognize`] calls.
///
/// [`add_states`]: Automaton::add_states
/// [`add_alphabet`]: Automaton::add_alphabet
/// [`add_transition`]: Automaton::add_transition
/// [`set_initial`]: Automaton::set_initial
/// [`add_finals`]: Automaton::add_finals
/// [`recognize`]: Automaton::recognize
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    /// States keyed by label; the position of each entry is the state id
    states: IndexMap<String, State>,
    /// Accepted input characters
    alphabet: HashSet<char>,
    /// Initial state (None until `set_initial`)
    initial: Option<StateId>,
    /// Final (accepting) states
    finals: StateSet,
}

impl Automaton {
    /// Create a new empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one state per label, with ids assigned in the given order.
    ///
    /// Labels are trimmed and blank labels skipped. A label that is already
    /// present, or given twice, rejects the whole call.
    pub fn add_states<I, S>(&mut self, labels: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();

        {
            let mut seen = HashSet::with_capacity(labels.len());
            for label in &labels {
                if self.states.contains_key(label) || !seen.insert(label.as_str()) {
                    return Err(AutomatonError::DuplicateState(label.clone()));
                }
            }
        }

        for label in labels {
            let id = self.states.len() as StateId;
            self.states.insert(label.clone(), State::new(id, label));
        }
        debug!("automaton has {} states", self.states.len());
        Ok(())
    }

    /// Add single-character symbols to the alphabet. Blank entries are skipped.
    pub fn add_alphabet<I, S>(&mut self, symbols: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if symbol.is_empty() {
                continue;
            }
            match Symbol::parse(symbol) {
                Some(Symbol::Char(c)) => parsed.push(c),
                _ => return Err(AutomatonError::InvalidSymbol(symbol.to_string())),
            }
        }

        self.alphabet.extend(parsed);
        debug!("alphabet has {} symbols", self.alphabet.len());
        Ok(())
    }

    /// Parse and register raw transition entries such as `A[a-B,C]`.
    ///
    /// Every entry is parsed and resolved before any is applied. Blank
    /// entries are skipped.
    pub fn add_transition<I, S>(&mut self, entries: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for raw in entries {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            let entry: TransitionEntry = raw.parse()?;
            self.resolve(&entry.source)?;
            for destination in &entry.destinations {
                self.resolve(destination)?;
            }
            parsed.push(entry);
        }

        for entry in parsed {
            let state = self
                .states
                .get_mut(&entry.source)
                .ok_or_else(|| AutomatonError::UnknownState(entry.source.clone()))?;
            trace!("{} -{}-> {:?}", entry.source, entry.symbol, entry.destinations);
            state.add_transition(entry.symbol, entry.destinations);
        }
        Ok(())
    }

    /// Mark the state with the given label as the initial one.
    pub fn set_initial(&mut self, label: &str) -> Result<(), AutomatonError> {
        let id = self.resolve(label.trim())?;
        self.initial = Some(id);
        debug!("initial state is {}", label.trim());
        Ok(())
    }

    /// Mark the states with the given labels as final ones.
    pub fn add_finals<I, S>(&mut self, labels: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .filter(|label| !label.is_empty())
            .map(|label| self.resolve(&label))
            .collect::<Result<Vec<_>, _>>()?;

        for id in ids {
            self.finals.insert(id);
        }
        debug!("automaton has {} final states", self.finals.len());
        Ok(())
    }

    fn resolve(&self, label: &str) -> Result<StateId, AutomatonError> {
        self.states
            .get_index_of(label)
            .map(|idx| idx as StateId)
            .ok_or_else(|| AutomatonError::UnknownState(label.to_string()))
    }

    /// Get a state by label.
    pub fn state(&self, label: &str) -> Option<&State> {
        self.states.get(label)
    }

    /// Get a state by id.
    pub fn state_by_id(&self, id: StateId) -> Option<&State> {
        self.states.get_index(id as usize).map(|(_, state)| state)
    }

    /// Iterate over the states in id order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &HashSet<char> {
        &self.alphabet
    }

    /// Get the initial state, if one has been set.
    pub fn initial(&self) -> Option<&State> {
        self.initial.and_then(|id| self.state_by_id(id))
    }

    /// Get the final states.
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Check if the state with the given id is final.
    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(id)
    }

    /// Compute the epsilon closure of a state using DFS.
    ///
    /// The closure always contains the state itself.
    pub fn epsilon_closure(&self, label: &str) -> Result<StateSet, AutomatonError> {
        let start = self.resolve(label)?;
        let mut closure = StateSet::with_capacity(self.num_states());
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !closure.insert(id) {
                continue;
            }

            let Some(state) = self.state_by_id(id) else {
                continue;
            };
            for destination in state.epsilon_transitions() {
                if let Some(dest) = self.states.get_index_of(destination.as_str()) {
                    if !closure.contains(dest as StateId) {
                        stack.push(dest as StateId);
                    }
                }
            }
        }

        Ok(closure)
    }
}

/// Writes the automaton back in the `Q/E/S/q/F` definition format.
impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.states.keys().map(String::as_str).collect();
        writeln!(f, "Q = {{{}}}", labels.join(";"))?;

        let mut alphabet: Vec<char> = self.alphabet.iter().copied().collect();
        alphabet.sort_unstable();
        let alphabet: Vec<String> = alphabet.iter().map(char::to_string).collect();
        writeln!(f, "E = {{{}}}", alphabet.join(";"))?;

        let mut transitions = Vec::new();
        for state in self.states() {
            for (symbol, destinations) in state.transitions() {
                let symbol = if symbol.is_epsilon() {
                    String::new()
                } else {
                    symbol.to_string()
                };
                transitions.push(format!(
                    "{}[{}-{}]",
                    state.label(),
                    symbol,
                    destinations.join(",")
                ));
            }
        }
        writeln!(f, "S = {{{}}}", transitions.join(";"))?;

        if let Some(initial) = self.initial() {
            writeln!(f, "q = {}", initial.label())?;
        }

        let finals: Vec<&str> = self
            .finals
            .iter()
            .filter_map(|id| self.state_by_id(id))
            .map(State::label)
            .collect();
        write!(f, "F = {{{}}}", finals.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::symbol::EPSILON;

    fn abc() -> Automaton {
        let mut nda = Automaton::new();
        nda.add_states(["A", "B", "C"]).unwrap();
        nda.add_alphabet(["a", "b"]).unwrap();
        nda
    }

    #[test]
    fn test_add_states_assigns_ids_in_order() {
        let nda = abc();
        assert_eq!(nda.num_states(), 3);
        assert_eq!(nda.state("A").map(State::id), Some(0));
        assert_eq!(nda.state("C").map(State::id), Some(2));
        assert_eq!(nda.state_by_id(1).map(State::label), Some("B"));
        assert!(nda.state("D").is_none());
    }

    #[test]
    fn test_add_states_rejects_duplicates() {
        let mut nda = Automaton::new();
        assert_eq!(
            nda.add_states(["A", "B", "A"]),
            Err(AutomatonError::DuplicateState("A".to_string()))
        );
        // Nothing from the rejected call is kept
        assert_eq!(nda.num_states(), 0);

        nda.add_states(["A"]).unwrap();
        assert_eq!(
            nda.add_states(["A"]),
            Err(AutomatonError::DuplicateState("A".to_string()))
        );
    }

    #[test]
    fn test_add_alphabet() {
        let mut nda = Automaton::new();
        nda.add_alphabet(["a", " b ", ""]).unwrap();
        assert_eq!(nda.alphabet().len(), 2);
        assert!(nda.alphabet().contains(&'b'));

        assert_eq!(
            nda.add_alphabet(["ab"]),
            Err(AutomatonError::InvalidSymbol("ab".to_string()))
        );
    }

    #[test]
    fn test_add_transition() {
        let mut nda = abc();
        nda.add_transition(["A[a-B,C]", "B[-A]"]).unwrap();

        let a = nda.state("A").unwrap();
        assert_eq!(a.transitions_for(Symbol::Char('a')).map(<[String]>::len), Some(2));
        assert!(nda.state("B").unwrap().has_epsilon());
        assert_eq!(nda.state("B").unwrap().transitions_for(EPSILON).map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_add_transition_unknown_state() {
        let mut nda = abc();
        assert_eq!(
            nda.add_transition(["A[a-B]", "A[b-Z]"]),
            Err(AutomatonError::UnknownState("Z".to_string()))
        );
        // The valid entry before the bad one was not applied either
        assert!(nda.state("A").unwrap().transitions_for(Symbol::Char('a')).is_none());

        assert_eq!(
            nda.add_transition(["X[a-A]"]),
            Err(AutomatonError::UnknownState("X".to_string()))
        );
    }

    #[test]
    fn test_set_initial_and_finals() {
        let mut nda = abc();
        assert!(nda.initial().is_none());
        nda.set_initial("A").unwrap();
        assert_eq!(nda.initial().map(State::label), Some("A"));
        assert_eq!(
            nda.set_initial("Z"),
            Err(AutomatonError::UnknownState("Z".to_string()))
        );

        nda.add_finals(["B", "C"]).unwrap();
        assert!(nda.is_final(1));
        assert!(nda.is_final(2));
        assert!(!nda.is_final(0));
        assert!(nda.add_finals(["A", "Q"]).is_err());
        assert!(!nda.is_final(0));
    }

    #[test]
    fn test_epsilon_closure() {
        // A -ε-> B -ε-> C -ε-> A, C -a-> D
        let mut nda = Automaton::new();
        nda.add_states(["A", "B", "C", "D"]).unwrap();
        nda.add_transition(["A[-B]", "B[-C]", "C[-A]", "C[a-D]"]).unwrap();

        let closure = nda.epsilon_closure("A").unwrap();
        assert_eq!(closure.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(nda.epsilon_closure("D").unwrap().iter().collect::<Vec<_>>(), vec![3]);
        assert!(nda.epsilon_closure("Z").is_err());
    }

    #[test]
    fn test_display() {
        let mut nda = abc();
        nda.add_transition(["A[a-B,C]", "C[-A]"]).unwrap();
        nda.set_initial("A").unwrap();
        nda.add_finals(["C"]).unwrap();

        assert_eq!(
            nda.to_string(),
            "Q = {A;B;C}\nE = {a;b}\nS = {A[a-B,C];C[-A]}\nq = A\nF = {C}"
        );
    }
}
