//! Zero-padded single-sided amplitude spectrum
//!
//! Recomputed in full on every update; nothing is cached between calls.
//! Computation failures are logged and produce an empty spectrum so an
//! interactive "Update Spectrum" shows a blank chart instead of aborting.

use super::axis::validate_sampling_rate;
use super::fft::FftEngine;
use crate::demodulation;
use crate::error::{ComputationError, ParameterError};

/// Spectrum configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    /// Zeros appended after the signal before the FFT
    pub zero_padding: usize,

    /// Subtract the signal mean before padding
    pub remove_dc: bool,

    /// Discard bin 0 from the result
    pub drop_first_bin: bool,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            zero_padding: 0,
            remove_dc: false,
            drop_first_bin: true,
        }
    }
}

impl SpectrumConfig {
    /// Plain spectrum: no padding, no DC handling, all bins kept
    pub fn raw() -> Self {
        Self {
            zero_padding: 0,
            remove_dc: false,
            drop_first_bin: false,
        }
    }

    /// Set zero padding from a signed value, as typed into a UI field
    pub fn with_zero_padding(mut self, zero_padding: i64) -> Result<Self, ParameterError> {
        if zero_padding < 0 {
            return Err(ParameterError::NegativeZeroPadding(zero_padding));
        }
        self.zero_padding = zero_padding as usize;
        Ok(self)
    }
}

/// A single bin of a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    pub index: usize,
    pub frequency: f64,
    pub amplitude: f64,
}

/// Single-sided amplitude spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz
    pub frequencies: Vec<f64>,

    /// (2/N)·|X[k]|
    pub amplitudes: Vec<f64>,

    /// Frequency spacing between bins (rate / N_padded), 0 when empty
    pub resolution: f64,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Width of one frequency bin in Hz
    pub fn bin_width(&self) -> f64 {
        self.resolution
    }

    /// Bin with the largest amplitude
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| self.point(index))
    }

    /// Bin closest to `frequency` (marker readout)
    pub fn nearest(&self, frequency: f64) -> Option<SpectrumPoint> {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - frequency)
                    .abs()
                    .partial_cmp(&(*b - frequency).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| self.point(index))
    }

    fn point(&self, index: usize) -> SpectrumPoint {
        SpectrumPoint {
            index,
            frequency: self.frequencies[index],
            amplitude: self.amplitudes[index],
        }
    }
}

/// Compute the single-sided amplitude spectrum of `signal`
///
/// # Arguments
/// * `signal` - Uniformly time-sampled input
/// * `sampling_rate` - Sample rate in Hz, must be positive
/// * `config` - Padding and DC handling
///
/// # Returns
/// `floor((len + zero_padding) / 2)` bins (one fewer with `drop_first_bin`,
/// unless only one bin exists); empty for an empty padded signal or when the
/// transform fails.
pub fn spectrum(
    signal: &[f64],
    sampling_rate: f64,
    config: &SpectrumConfig,
) -> Result<Spectrum, ParameterError> {
    validate_sampling_rate(sampling_rate)?;

    match compute_spectrum(signal, sampling_rate, config) {
        Ok(result) => Ok(result),
        Err(e) => {
            log::warn!("Spectrum calculation failed, showing empty result: {}", e);
            Ok(Spectrum::default())
        }
    }
}

/// Spectrum of the Hilbert envelope of `signal`
///
/// The envelope carries the interferometric beat; its spectrum is what the
/// main view plots after each update.
pub fn envelope_spectrum(
    signal: &[f64],
    sampling_rate: f64,
    config: &SpectrumConfig,
) -> Result<Spectrum, ParameterError> {
    validate_sampling_rate(sampling_rate)?;
    let envelope = demodulation::envelope(signal);
    spectrum(&envelope, sampling_rate, config)
}

fn compute_spectrum(
    signal: &[f64],
    sampling_rate: f64,
    config: &SpectrumConfig,
) -> Result<Spectrum, ComputationError> {
    let n = signal
        .len()
        .checked_add(config.zero_padding)
        .ok_or(ComputationError::LengthOverflow {
            len: signal.len(),
            padding: config.zero_padding,
        })?;
    if n < 2 {
        return Ok(Spectrum::default());
    }

    log::debug!(
        "Spectrum of {} samples + {} zeros at {} Hz",
        signal.len(),
        config.zero_padding,
        sampling_rate
    );

    let centred: Vec<f64> = if config.remove_dc && !signal.is_empty() {
        let mean = signal.iter().sum::<f64>() / signal.len() as f64;
        signal.iter().map(|x| x - mean).collect()
    } else {
        signal.to_vec()
    };

    // FftEngine pads with zeros up to the planned size
    let mut engine = FftEngine::new(n);
    let magnitude = engine.compute_magnitude(&centred)?;

    let half = n / 2;
    let scale = 2.0 / n as f64;

    let mut frequencies: Vec<f64> = (0..half).map(|k| engine.bin_to_hz(k, sampling_rate)).collect();
    let mut amplitudes: Vec<f64> = magnitude[..half].iter().map(|m| scale * m).collect();

    // Never drop the only bin
    if config.drop_first_bin && frequencies.len() > 1 {
        frequencies.remove(0);
        amplitudes.remove(0);
    }

    Ok(Spectrum {
        frequencies,
        amplitudes,
        resolution: engine.bin_to_hz(1, sampling_rate),
    })
}
