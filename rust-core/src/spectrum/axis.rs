//! Abscissa construction for raw-signal plots
//!
//! A signal is either uniformly time-sampled or spans a wavelength sweep.
//! The sweep axis is for display only; spectral math always assumes
//! uniform time sampling.

use crate::error::ParameterError;

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Start of the interferometer's laser sweep (m)
pub const DEFAULT_SWEEP_START: f64 = 1410e-9;

/// End of the interferometer's laser sweep (m)
pub const DEFAULT_SWEEP_END: f64 = 1490e-9;

/// Wavelength range covered by the N samples of a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthSweep {
    /// Wavelength of the first sample (m)
    pub start: f64,

    /// Wavelength of the last sample (m)
    pub end: f64,
}

impl Default for WavelengthSweep {
    fn default() -> Self {
        Self {
            start: DEFAULT_SWEEP_START,
            end: DEFAULT_SWEEP_END,
        }
    }
}

impl WavelengthSweep {
    /// Create a sweep, rejecting non-positive or non-finite wavelengths
    pub fn new(start: f64, end: f64) -> Result<Self, ParameterError> {
        let valid = |w: f64| w.is_finite() && w > 0.0;
        if !valid(start) || !valid(end) {
            return Err(ParameterError::InvalidSweep { start, end });
        }
        Ok(Self { start, end })
    }

    /// Wavelengths linearly spaced from `start` to `end` inclusive
    pub fn wavelengths(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.start],
            _ => {
                let step = (self.end - self.start) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.end
                        } else {
                            self.start + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }

    /// Optical frequency axis f = c / λ, in THz
    pub fn frequency_axis_thz(&self, n: usize) -> Vec<f64> {
        self.wavelengths(n)
            .into_iter()
            .map(|lambda| SPEED_OF_LIGHT / lambda / 1e12)
            .collect()
    }
}

/// How the samples of a signal are laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingDescriptor {
    /// Uniform time sampling at the given rate (Hz)
    Rate(f64),

    /// Samples spread across a wavelength sweep
    WavelengthSweep(WavelengthSweep),
}

impl SamplingDescriptor {
    /// Axis values for `n` samples: seconds for `Rate`, THz for a sweep
    pub fn axis(&self, n: usize) -> Result<Vec<f64>, ParameterError> {
        match self {
            SamplingDescriptor::Rate(rate) => time_axis(n, *rate),
            SamplingDescriptor::WavelengthSweep(sweep) => Ok(sweep.frequency_axis_thz(n)),
        }
    }

    /// Axis label for plots and reports
    pub fn unit_label(&self) -> &'static str {
        match self {
            SamplingDescriptor::Rate(_) => "Time (s)",
            SamplingDescriptor::WavelengthSweep(_) => "Frequency (THz)",
        }
    }
}

/// Reject sampling rates that are not positive and finite
pub fn validate_sampling_rate(rate: f64) -> Result<(), ParameterError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidSamplingRate(rate))
    }
}

/// Time axis t[i] = i / rate
pub fn time_axis(n: usize, rate: f64) -> Result<Vec<f64>, ParameterError> {
    validate_sampling_rate(rate)?;
    Ok((0..n).map(|i| i as f64 / rate).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_axis() {
        let t = time_axis(4, 2.0).unwrap();
        assert_eq!(t, vec![0.0, 0.5, 1.0, 1.5]);
        assert!(time_axis(4, 0.0).is_err());
        assert!(time_axis(4, f64::NAN).is_err());
    }

    #[test]
    fn test_default_sweep_axis() {
        let sweep = WavelengthSweep::default();
        let axis = sweep.frequency_axis_thz(81);

        assert_eq!(axis.len(), 81);
        // c / 1410 nm ≈ 212.6 THz, c / 1490 nm ≈ 201.2 THz
        assert!((axis[0] - 212.6188).abs() < 1e-3);
        assert!((axis[80] - 201.2030).abs() < 1e-3);
        // Frequency falls as wavelength grows
        assert!(axis.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_sweep_endpoints_exact() {
        let sweep = WavelengthSweep::default();
        let wl = sweep.wavelengths(7);
        assert_eq!(wl[0], DEFAULT_SWEEP_START);
        assert_eq!(wl[6], DEFAULT_SWEEP_END);
        assert!(sweep.wavelengths(0).is_empty());
        assert_eq!(sweep.wavelengths(1), vec![DEFAULT_SWEEP_START]);
    }

    #[test]
    fn test_descriptor_modes() {
        let rate = SamplingDescriptor::Rate(1000.0);
        assert_eq!(rate.axis(3).unwrap(), vec![0.0, 0.001, 0.002]);

        let sweep = SamplingDescriptor::WavelengthSweep(WavelengthSweep::default());
        assert_eq!(sweep.axis(3).unwrap().len(), 3);
        assert_ne!(rate.unit_label(), sweep.unit_label());
    }

    #[test]
    fn test_invalid_sweep() {
        assert!(WavelengthSweep::new(-1.0, 1490e-9).is_err());
        assert!(WavelengthSweep::new(1410e-9, f64::INFINITY).is_err());
    }
}
