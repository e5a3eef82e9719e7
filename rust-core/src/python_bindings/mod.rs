//! PyO3 bindings for the desktop front-end

use pyo3::prelude::*;
use pyo3::exceptions::{PyIOError, PyValueError};

use crate::error::{EngineError, LoadError, ParameterError};

mod filter_bindings;
mod spectrum_bindings;
mod store_bindings;

pub(crate) fn parameter_error(e: ParameterError) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

pub(crate) fn engine_error(e: EngineError) -> PyErr {
    match e {
        EngineError::Parameter(e) => parameter_error(e),
        EngineError::Computation(e) => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()),
    }
}

pub(crate) fn load_error(e: LoadError) -> PyErr {
    PyErr::new::<PyIOError, _>(e.to_string())
}

/// Python module definition
#[pymodule]
fn interferometer(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyFilterKind>()?;
    m.add_class::<store_bindings::PyChannelStore>()?;

    m.add_function(wrap_pyfunction!(filter_bindings::apply_filter, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::envelope_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::demodulate, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::find_peaks, m)?)?;

    Ok(())
}
