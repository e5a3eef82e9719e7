//! Python bindings for smoothing filters

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};

use crate::filters::{self, FilterKind};
use super::engine_error;

/// Filter kind enum exposed to Python
#[pyclass(name = "FilterKind")]
#[derive(Clone, Copy)]
pub enum PyFilterKind {
    MovingAverage,
    Gaussian,
    SavitzkyGolay,
}

impl From<PyFilterKind> for FilterKind {
    fn from(py_kind: PyFilterKind) -> Self {
        match py_kind {
            PyFilterKind::MovingAverage => FilterKind::MovingAverage,
            PyFilterKind::Gaussian => FilterKind::Gaussian,
            PyFilterKind::SavitzkyGolay => FilterKind::SavitzkyGolay,
        }
    }
}

/// Smooth a signal
///
/// Args:
///     signal: Input samples as numpy array
///     kind: Filter kind
///     window: Window length (sigma for Gaussian)
///
/// Returns:
///     Filtered signal, same length as the input
#[pyfunction]
pub fn apply_filter<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    kind: PyFilterKind,
    window: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let sig = signal.as_array().to_vec();
    let filtered = filters::apply(&sig, kind.into(), window).map_err(engine_error)?;

    Ok(PyArray1::from_vec(py, filtered))
}
