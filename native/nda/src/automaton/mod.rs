//! Non-deterministic automaton with epsilon transitions.
//!
//! This module provides:
//! - States, symbols and compact state sets
//! - Parsing of `A[a-B,C]` transition entries
//! - Automaton construction and epsilon closure computation
//! - The backtracking recognizer
//! - PyO3 bindings for Python interoperability (feature `python`)

mod error;
mod nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod recognize;
mod state;
mod symbol;
mod transition;

pub use error::{AutomatonError, RecognitionError};
pub use nfa::Automaton;
#[cfg(feature = "python")]
pub use python_bindings::{PyAutomaton, automaton};
pub use state::{State, StateId, StateSet};
pub use symbol::{EPSILON, Symbol};
pub use transition::TransitionEntry;
