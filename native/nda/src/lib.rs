pub mod automaton;
pub mod definition;
pub mod shell;

pub use automaton::{Automaton, AutomatonError, RecognitionError};
pub use definition::{DefinitionError, load_file, parse_definition};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Add the submodule to sys.modules
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{}.{}", package, name), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pymodule]
fn nda(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "nda", "automaton", automaton::automaton)?;

    m.add_class::<automaton::PyAutomaton>()?;
    Ok(())
}
