//! Backtracking recognizer over the nondeterministic transition relation.

use crate::automaton::error::RecognitionError;
use crate::automaton::nfa::Automaton;
use crate::automaton::state::{State, StateId, StateSet};
use log::{debug, trace};
use std::collections::HashMap;

impl Automaton {
    /// Test the given string against the automaton.
    ///
    /// Starting on the initial state, the automaton consumes the string one
    /// character at a time, trying every nondeterministic choice and epsilon
    /// move, and accepts iff some run ends on a final state (possibly after
    /// trailing epsilon moves). A character outside the alphabet rejects the
    /// string before any search.
    ///
    /// # Panics
    ///
    /// Panics if the automaton was never given an initial state. Use
    /// [`try_recognize`](Automaton::try_recognize) to handle that case.
    pub fn recognize(&self, text: &str) -> bool {
        match self.try_recognize(text) {
            Ok(recognized) => recognized,
            Err(err) => panic!("automaton invariant violated: {err}"),
        }
    }

    /// Like [`recognize`](Automaton::recognize), but reports an incompletely
    /// built automaton as an error instead of panicking.
    pub fn try_recognize(&self, text: &str) -> Result<bool, RecognitionError> {
        if let Some(symbol) = text.chars().find(|c| !self.alphabet().contains(c)) {
            debug!("rejecting {text:?}: {symbol:?} is not in the alphabet");
            return Ok(false);
        }

        let initial = self.initial().ok_or(RecognitionError::MissingInitialState)?;
        if self.finals().is_empty() {
            debug!("rejecting {text:?}: no final states");
            return Ok(false);
        }

        let recognized = Search::new(self, text).run(initial)?;
        debug!("{text:?} recognized: {recognized}");
        Ok(recognized)
    }
}

/// Which outgoing transition of a frame is tried next.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Index into the destinations listed for the current character
    Listed(usize),
    /// Index into the epsilon destinations
    Epsilon(usize),
}

/// One pending configuration of the depth-first search.
struct Frame<'a> {
    state: &'a State,
    /// Characters of the input already consumed
    position: usize,
    step: Step,
}

impl<'a> Frame<'a> {
    fn new(state: &'a State, position: usize) -> Self {
        Self {
            state,
            position,
            step: Step::Listed(0),
        }
    }
}

/// Search context for a single recognition call.
struct Search<'a> {
    automaton: &'a Automaton,
    input: Vec<char>,
    /// Epsilon destinations already taken, keyed by input position
    epsilon_visits: HashMap<usize, StateSet>,
}

impl<'a> Search<'a> {
    fn new(automaton: &'a Automaton, text: &str) -> Self {
        Self {
            automaton,
            input: text.chars().collect(),
            epsilon_visits: HashMap::new(),
        }
    }

    /// Depth-first search over `(state, position)` configurations, starting
    /// on `initial` with nothing consumed.
    ///
    /// The frames live on an explicit stack, so the input length does not
    /// bound the native stack. Each frame tries the destinations listed for
    /// the current character in order, then its untried epsilon moves.
    fn run(&mut self, initial: &'a State) -> Result<bool, RecognitionError> {
        let mut stack = vec![Frame::new(initial, 0)];

        while let Some(frame) = stack.last_mut() {
            let state = frame.state;
            let position = frame.position;

            let Some(&symbol) = self.input.get(position) else {
                if self.accepts_at_end(state)? {
                    return Ok(true);
                }
                stack.pop();
                continue;
            };

            match frame.step {
                Step::Listed(idx) => {
                    if idx == 0 {
                        trace!("at {} (position {position}) reading {symbol:?}", state.label());
                    }
                    let listed = state.transitions_for(symbol.into()).unwrap_or_default();
                    match listed.get(idx) {
                        Some(label) => {
                            frame.step = Step::Listed(idx + 1);
                            let next = self.resolve(label)?;
                            stack.push(Frame::new(next, position + 1));
                        }
                        None => frame.step = Step::Epsilon(0),
                    }
                }
                // An epsilon move keeps the symbol unconsumed, so the
                // destination retries it at the same position.
                Step::Epsilon(idx) => match state.epsilon_transitions().get(idx) {
                    Some(label) => {
                        frame.step = Step::Epsilon(idx + 1);
                        let next = self.resolve(label)?;
                        if self.visit_epsilon(position, next.id()) {
                            trace!("{} -ε-> {} at position {position}", state.label(), next.label());
                            stack.push(Frame::new(next, position));
                        }
                    }
                    None => {
                        stack.pop();
                    }
                },
            }
        }

        Ok(false)
    }

    /// Decide acceptance once the whole input has been consumed.
    fn accepts_at_end(&self, state: &'a State) -> Result<bool, RecognitionError> {
        if self.automaton.is_final(state.id()) {
            return Ok(true);
        }
        if !state.has_epsilon() {
            return Ok(false);
        }
        self.final_reachable(state)
    }

    /// Check if a final state is reachable from `start` using only epsilon
    /// transitions. Depth-first, stopping at the first final state found.
    fn final_reachable(&self, start: &'a State) -> Result<bool, RecognitionError> {
        let mut visited = StateSet::with_capacity(self.automaton.num_states());
        let mut stack = vec![start];

        while let Some(state) = stack.pop() {
            if self.automaton.is_final(state.id()) {
                return Ok(true);
            }
            if !visited.insert(state.id()) {
                continue;
            }

            // Reversed so the first listed destination is explored first
            for label in state.epsilon_transitions().iter().rev() {
                let next = self.resolve(label)?;
                if !visited.contains(next.id()) {
                    stack.push(next);
                }
            }
        }

        Ok(false)
    }

    /// Record an epsilon move into `state` at `position`. Returns false if
    /// that move was already taken at this position.
    fn visit_epsilon(&mut self, position: usize, state: StateId) -> bool {
        let capacity = self.automaton.num_states();
        self.epsilon_visits
            .entry(position)
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(state)
    }

    fn resolve(&self, label: &str) -> Result<&'a State, RecognitionError> {
        self.automaton
            .state(label)
            .ok_or_else(|| RecognitionError::UnresolvedState(label.to_string()))
    }
}
