//! PyO3 bindings for the automaton module.

use crate::automaton::nfa::Automaton;
use crate::definition::parse_definition;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn value_error(err: impl ToString) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A non-deterministic automaton with epsilon transitions.
#[pyclass(name = "Automaton", module = "nda.automaton")]
pub struct PyAutomaton {
    /// The underlying Rust automaton
    inner: Automaton,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn new() -> Self {
        Self {
            inner: Automaton::new(),
        }
    }

    /// Build an automaton from a `Q/E/S/q/F` definition.
    #[staticmethod]
    fn from_definition(text: &str) -> PyResult<Self> {
        let inner = parse_definition(text).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn add_states(&mut self, states: Vec<String>) -> PyResult<()> {
        self.inner.add_states(states).map_err(value_error)
    }

    fn add_alphabet(&mut self, alphabet: Vec<String>) -> PyResult<()> {
        self.inner.add_alphabet(alphabet).map_err(value_error)
    }

    /// Add raw transition entries such as `A[a-B,C]` or `B[-A]`.
    fn add_transition(&mut self, transitions: Vec<String>) -> PyResult<()> {
        self.inner.add_transition(transitions).map_err(value_error)
    }

    fn set_initial(&mut self, initial: &str) -> PyResult<()> {
        self.inner.set_initial(initial).map_err(value_error)
    }

    fn add_finals(&mut self, finals: Vec<String>) -> PyResult<()> {
        self.inner.add_finals(finals).map_err(value_error)
    }

    /// Test a string against the automaton.
    fn recognize(&self, text: &str) -> PyResult<bool> {
        self.inner
            .try_recognize(text)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Get the labels of the states epsilon-reachable from `label`.
    fn epsilon_closure(&self, label: &str) -> PyResult<Vec<String>> {
        let closure = self.inner.epsilon_closure(label).map_err(value_error)?;
        Ok(closure
            .iter()
            .filter_map(|id| self.inner.state_by_id(id))
            .map(|state| state.label().to_string())
            .collect())
    }

    fn __len__(&self) -> usize {
        self.inner.num_states()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, finals={})",
            self.inner.num_states(),
            self.inner.finals().len()
        )
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    Ok(())
}
