//! Spectral analysis with FFT

pub mod fft;
pub mod axis;
pub mod analysis;

pub use fft::FftEngine;
pub use axis::{SamplingDescriptor, WavelengthSweep, time_axis};
pub use analysis::{Spectrum, SpectrumConfig, SpectrumPoint, envelope_spectrum, spectrum};
