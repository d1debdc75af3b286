//! Error types for automaton construction and recognition.

use thiserror::Error;

/// Errors raised while building an automaton.
///
/// Construction fails fast: a setup call that returns one of these leaves the
/// automaton exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A transition, initial marker or final marker names a missing state.
    #[error("unknown state `{0}`")]
    UnknownState(String),
    /// The same label was given to more than one state.
    #[error("duplicate state `{0}`")]
    DuplicateState(String),
    /// A transition entry does not have the `A[a-B,C]` shape.
    #[error("malformed transition `{entry}`: {reason}")]
    MalformedTransition { entry: String, reason: &'static str },
    /// An alphabet entry is not exactly one character.
    #[error("alphabet symbol `{0}` is not a single character")]
    InvalidSymbol(String),
}

/// Internal invariant violations detected during recognition.
///
/// These never describe a rejected string; they mean the automaton was not
/// built completely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    /// Recognition started before `set_initial` was called.
    #[error("no initial state has been set")]
    MissingInitialState,
    /// A transition destination does not name a state of the automaton.
    #[error("transition refers to unresolved state `{0}`")]
    UnresolvedState(String),
}
