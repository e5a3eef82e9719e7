//! Python bindings for the channel store

use std::path::PathBuf;

use pyo3::prelude::*;
use numpy::PyArray1;

use crate::store::ChannelStore;
use crate::table::load_table;
use super::filter_bindings::PyFilterKind;
use super::{engine_error, load_error, parameter_error};

/// Loaded table and selected channel, exposed to Python
#[pyclass(name = "ChannelStore")]
pub struct PyChannelStore {
    store: ChannelStore,
}

#[pymethods]
impl PyChannelStore {
    #[new]
    fn new() -> Self {
        Self {
            store: ChannelStore::new(),
        }
    }

    /// Load a table file and select its first channel
    ///
    /// A failed load clears the store before raising.
    ///
    /// Returns:
    ///     List of channel names
    fn load(&mut self, path: PathBuf) -> PyResult<Vec<String>> {
        match load_table(&path) {
            Ok(table) => {
                let names = table.channel_names().to_vec();
                self.store.load(table);
                Ok(names)
            }
            Err(e) => {
                self.store.clear();
                Err(load_error(e))
            }
        }
    }

    /// Switch channel; clears the filtered overlay
    fn select_channel<'py>(&mut self, py: Python<'py>, index: usize) -> PyResult<&'py PyArray1<f64>> {
        let raw = self.store.select_channel(index).map_err(parameter_error)?;
        Ok(PyArray1::from_slice(py, raw))
    }

    /// Filter the raw channel into the overlay
    fn apply_filter<'py>(
        &mut self,
        py: Python<'py>,
        kind: PyFilterKind,
        window: usize,
    ) -> PyResult<&'py PyArray1<f64>> {
        let processed = self.store.apply_filter(kind.into(), window).map_err(engine_error)?;
        Ok(PyArray1::from_slice(py, processed))
    }

    fn raw_channel<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.store.raw_channel())
    }

    fn processed_overlay<'py>(&self, py: Python<'py>) -> Option<&'py PyArray1<f64>> {
        self.store.processed_overlay().map(|p| PyArray1::from_slice(py, p))
    }

    /// Overlay if present, otherwise the raw channel
    fn active_signal<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.store.active_signal())
    }

    fn current_channel(&self) -> Option<usize> {
        self.store.current_channel()
    }

    /// Returns:
    ///     Tuple of (channels, samples), or None before a load
    fn summary(&self) -> Option<(usize, usize)> {
        self.store.summary().map(|s| (s.channels, s.samples))
    }
}
