//! One-shot analysis of a channel
//!
//! Runs every engine over the active signal and bundles the results the way
//! a view refresh consumes them.

use crate::demodulation::{demodulate, DemodulationResult};
use crate::error::ParameterError;
use crate::peaks::{find_peaks, PeakPolicy, PeakSet};
use crate::spectrum::{envelope_spectrum, spectrum, SamplingDescriptor, Spectrum, SpectrumConfig};

/// Sampling rate used when none is configured
pub const DEFAULT_SAMPLING_RATE: f64 = 1000.0;

/// Parameters for a full channel analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Sample rate in Hz
    pub sampling_rate: f64,

    /// Padding and DC handling for both spectra
    pub spectrum: SpectrumConfig,

    /// Peak policy applied to the signal itself
    pub peak_policy: PeakPolicy,

    /// Axis the raw signal is plotted against
    pub axis: SamplingDescriptor,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling_rate: DEFAULT_SAMPLING_RATE,
            spectrum: SpectrumConfig::default(),
            peak_policy: PeakPolicy::default(),
            axis: SamplingDescriptor::Rate(DEFAULT_SAMPLING_RATE),
        }
    }
}

impl AnalysisConfig {
    /// Change the sample rate, keeping a rate-based axis in step
    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = sampling_rate;
        if let SamplingDescriptor::Rate(_) = self.axis {
            self.axis = SamplingDescriptor::Rate(sampling_rate);
        }
        self
    }
}

/// Everything derived from one signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelAnalysis {
    /// Plotting axis for the signal (seconds or THz)
    pub axis: Vec<f64>,

    pub demodulation: DemodulationResult,

    /// Spectrum of the Hilbert envelope
    pub envelope_spectrum: Spectrum,

    /// Spectrum of the signal itself
    pub spectrum: Spectrum,

    /// Peaks of the signal, indexed against `axis`
    pub peaks: PeakSet,
}

impl ChannelAnalysis {
    /// Run axis, demodulation, both spectra and peak detection over `signal`
    pub fn compute(signal: &[f64], config: &AnalysisConfig) -> Result<Self, ParameterError> {
        log::debug!("Analysing {} samples at {} Hz", signal.len(), config.sampling_rate);

        let axis = config.axis.axis(signal.len())?;
        let demodulation = demodulate(signal, config.sampling_rate)?;
        let envelope_spectrum = envelope_spectrum(signal, config.sampling_rate, &config.spectrum)?;
        let spectrum = spectrum(signal, config.sampling_rate, &config.spectrum)?;
        let peaks = find_peaks(signal, &config.peak_policy)?;

        Ok(Self {
            axis,
            demodulation,
            envelope_spectrum,
            spectrum,
            peaks,
        })
    }

    /// Peaks as (axis, value) pairs
    pub fn peak_coordinates(&self) -> Vec<(f64, f64)> {
        self.peaks.coordinates(&self.axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::WavelengthSweep;
    use std::f64::consts::PI;

    fn am_signal(n: usize, rate: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / rate;
                (1.0 + 0.5 * (2.0 * PI * 5.0 * t).cos()) * (2.0 * PI * 100.0 * t).cos()
            })
            .collect()
    }

    #[test]
    fn test_compute_default() {
        let signal = am_signal(1000, 1000.0);
        let analysis = ChannelAnalysis::compute(&signal, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.axis.len(), 1000);
        assert_eq!(analysis.demodulation.len(), 1000);
        assert_eq!(analysis.spectrum.len(), 499);

        let carrier = analysis.spectrum.peak().unwrap();
        assert!((carrier.frequency - 100.0).abs() <= analysis.spectrum.bin_width());

        let beat = analysis.envelope_spectrum.peak().unwrap();
        assert!((beat.frequency - 5.0).abs() <= analysis.envelope_spectrum.bin_width());
    }

    #[test]
    fn test_peak_coordinates_on_axis() {
        let signal = vec![0.0, 2.0, 0.0, 3.0, 0.0];
        let config = AnalysisConfig::default().with_sampling_rate(10.0);
        let analysis = ChannelAnalysis::compute(&signal, &config).unwrap();

        assert_eq!(analysis.peaks.indices(), vec![1, 3]);
        let coords = analysis.peak_coordinates();
        assert!((coords[0].0 - 0.1).abs() < 1e-12);
        assert!((coords[1].0 - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_axis() {
        let config = AnalysisConfig {
            axis: SamplingDescriptor::WavelengthSweep(WavelengthSweep::default()),
            ..AnalysisConfig::default()
        };
        let analysis = ChannelAnalysis::compute(&am_signal(64, 1000.0), &config).unwrap();

        assert_eq!(analysis.axis.len(), 64);
        assert!(analysis.axis[0] > analysis.axis[63]);
    }

    #[test]
    fn test_empty_signal() {
        let analysis = ChannelAnalysis::compute(&[], &AnalysisConfig::default()).unwrap();
        assert!(analysis.axis.is_empty());
        assert!(analysis.demodulation.is_empty());
        assert!(analysis.spectrum.is_empty());
        assert!(analysis.peaks.is_empty());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = AnalysisConfig {
            peak_policy: PeakPolicy::Prominence { min_prominence: f64::INFINITY },
            ..AnalysisConfig::default()
        };
        assert_eq!(
            ChannelAnalysis::compute(&[0.0, 1.0, 0.0], &config).unwrap_err(),
            ParameterError::InvalidThreshold(f64::INFINITY)
        );
    }

    #[test]
    fn test_invalid_rate() {
        let config = AnalysisConfig::default().with_sampling_rate(0.0);
        assert_eq!(
            ChannelAnalysis::compute(&[1.0, 2.0], &config).unwrap_err(),
            ParameterError::InvalidSamplingRate(0.0)
        );
    }
}
