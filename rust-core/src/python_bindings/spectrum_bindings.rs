//! Python bindings for spectra, demodulation and peaks

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};

use crate::demodulation;
use crate::peaks::{self, PeakPolicy};
use crate::spectrum::{self as spectra, SpectrumConfig};
use super::parameter_error;

type SpectrumArrays<'py> = (&'py PyArray1<f64>, &'py PyArray1<f64>);

fn spectrum_config(zero_padding: i64, remove_dc: bool, drop_first_bin: bool) -> PyResult<SpectrumConfig> {
    SpectrumConfig {
        remove_dc,
        drop_first_bin,
        ..SpectrumConfig::raw()
    }
    .with_zero_padding(zero_padding)
    .map_err(parameter_error)
}

/// Single-sided amplitude spectrum
///
/// Args:
///     signal: Input samples as numpy array
///     sampling_rate: Sample rate in Hz
///     zero_padding: Zeros appended before the transform (must be >= 0)
///     remove_dc: Subtract the mean first
///     drop_first_bin: Omit the 0 Hz bin
///
/// Returns:
///     Tuple of (frequencies, amplitudes)
#[pyfunction]
#[pyo3(signature = (signal, sampling_rate, zero_padding=0, remove_dc=false, drop_first_bin=true))]
pub fn spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sampling_rate: f64,
    zero_padding: i64,
    remove_dc: bool,
    drop_first_bin: bool,
) -> PyResult<SpectrumArrays<'py>> {
    let config = spectrum_config(zero_padding, remove_dc, drop_first_bin)?;
    let sig = signal.as_array().to_vec();
    let result = spectra::spectrum(&sig, sampling_rate, &config).map_err(parameter_error)?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray1::from_vec(py, result.amplitudes),
    ))
}

/// Spectrum of the Hilbert envelope
///
/// Same arguments and return value as `spectrum`.
#[pyfunction]
#[pyo3(signature = (signal, sampling_rate, zero_padding=0, remove_dc=false, drop_first_bin=true))]
pub fn envelope_spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sampling_rate: f64,
    zero_padding: i64,
    remove_dc: bool,
    drop_first_bin: bool,
) -> PyResult<SpectrumArrays<'py>> {
    let config = spectrum_config(zero_padding, remove_dc, drop_first_bin)?;
    let sig = signal.as_array().to_vec();
    let result = spectra::envelope_spectrum(&sig, sampling_rate, &config).map_err(parameter_error)?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray1::from_vec(py, result.amplitudes),
    ))
}

/// Envelope and unwrapped phase
///
/// Returns:
///     Tuple of (envelope, phase, time)
#[pyfunction]
pub fn demodulate<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sampling_rate: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let sig = signal.as_array().to_vec();
    let result = demodulation::demodulate(&sig, sampling_rate).map_err(parameter_error)?;

    Ok((
        PyArray1::from_vec(py, result.envelope),
        PyArray1::from_vec(py, result.phase),
        PyArray1::from_vec(py, result.time),
    ))
}

/// Peak indices
///
/// Args:
///     signal: Input samples as numpy array
///     method: "prominence" or "derivative"
///     min_prominence: Threshold for the prominence method
#[pyfunction]
#[pyo3(signature = (signal, method="prominence", min_prominence=peaks::DEFAULT_MIN_PROMINENCE))]
pub fn find_peaks(signal: PyReadonlyArray1<f64>, method: &str, min_prominence: f64) -> PyResult<Vec<usize>> {
    let policy = match method {
        "prominence" => PeakPolicy::Prominence { min_prominence },
        "derivative" => PeakPolicy::derivative(),
        other => {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Unknown peak method '{}'",
                other
            )))
        }
    };
    let sig = signal.as_array().to_vec();
    let found = peaks::find_peaks(&sig, &policy).map_err(parameter_error)?;
    Ok(found.indices())
}
