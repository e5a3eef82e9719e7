//! Interferometer Signal Workbench - numeric core
//!
//! Loads multi-channel interferometer recordings, smooths a selected channel,
//! demodulates it into envelope and phase, computes amplitude spectra and
//! locates peaks. Optional Python bindings behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod table;
pub mod filters;
pub mod spectrum;
pub mod demodulation;
pub mod peaks;
pub mod store;
pub mod pipeline;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{ComputationError, EngineError, LoadError, ParameterError};
pub use table::{ChannelTable, load_table};
pub use filters::FilterKind;
pub use spectrum::{SamplingDescriptor, Spectrum, SpectrumConfig, WavelengthSweep, spectrum};
pub use demodulation::{DemodulationResult, demodulate};
pub use peaks::{Peak, PeakPolicy, PeakSet, find_peaks};
pub use store::{ChannelStore, TableSummary};
pub use pipeline::{AnalysisConfig, ChannelAnalysis};
