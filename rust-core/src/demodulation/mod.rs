//! Envelope and phase demodulation via the analytic signal

pub mod hilbert;

pub use hilbert::{analytic_signal, unwrap_phase};

use crate::error::ParameterError;
use crate::spectrum::axis::{time_axis, validate_sampling_rate};

/// Instantaneous amplitude and phase of one input signal
///
/// All three vectors have the input's length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemodulationResult {
    /// |x_a[i]|
    pub envelope: Vec<f64>,

    /// unwrap(arg(x_a[i])) in radians
    pub phase: Vec<f64>,

    /// i / sampling_rate in seconds
    pub time: Vec<f64>,
}

impl DemodulationResult {
    pub fn len(&self) -> usize {
        self.envelope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelope.is_empty()
    }
}

/// Demodulate a real signal into envelope and unwrapped phase
///
/// # Arguments
/// * `signal` - Real samples
/// * `sampling_rate` - Sample rate in Hz, must be positive
///
/// An empty signal yields an empty result.
pub fn demodulate(signal: &[f64], sampling_rate: f64) -> Result<DemodulationResult, ParameterError> {
    validate_sampling_rate(sampling_rate)?;
    log::debug!("Demodulating {} samples at {} Hz", signal.len(), sampling_rate);

    let analytic = analytic_signal(signal);
    let envelope = analytic.iter().map(|c| c.norm()).collect();
    let wrapped: Vec<f64> = analytic.iter().map(|c| c.arg()).collect();

    Ok(DemodulationResult {
        envelope,
        phase: unwrap_phase(&wrapped),
        time: time_axis(signal.len(), sampling_rate)?,
    })
}

/// Hilbert envelope only
pub fn envelope(signal: &[f64]) -> Vec<f64> {
    analytic_signal(signal).iter().map(|c| c.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_lengths_match_input() {
        let signal: Vec<f64> = (0..37).map(|i| (i as f64 * 0.4).sin() + 0.1).collect();
        let result = demodulate(&signal, 250.0).unwrap();

        assert_eq!(result.envelope.len(), signal.len());
        assert_eq!(result.phase.len(), signal.len());
        assert_eq!(result.time.len(), signal.len());
        assert!((result.time[4] - 4.0 / 250.0).abs() < 1e-15);
    }

    #[test]
    fn test_empty_signal() {
        let result = demodulate(&[], 1000.0).unwrap();
        assert!(result.is_empty());
        assert!(result.phase.is_empty());
        assert!(result.time.is_empty());
    }

    #[test]
    fn test_invalid_sampling_rate() {
        assert_eq!(
            demodulate(&[1.0, 2.0], 0.0).unwrap_err(),
            ParameterError::InvalidSamplingRate(0.0)
        );
        assert!(demodulate(&[1.0, 2.0], -5.0).is_err());
    }

    #[test]
    fn test_am_envelope_and_linear_phase() {
        // 50 Hz carrier, 2 Hz modulation, whole cycles of both over 1 s
        let rate = 1000.0;
        let signal: Vec<f64> = (0..1000)
            .map(|i| {
                let t = i as f64 / rate;
                (1.0 + 0.5 * (2.0 * PI * 2.0 * t).cos()) * (2.0 * PI * 50.0 * t).cos()
            })
            .collect();

        let result = demodulate(&signal, rate).unwrap();

        for i in (0..1000).step_by(50) {
            let t = i as f64 / rate;
            let expected = 1.0 + 0.5 * (2.0 * PI * 2.0 * t).cos();
            assert!((result.envelope[i] - expected).abs() < 1e-6);
        }

        // Unwrapped phase grows by 2π·50 rad over the record
        let slope = (result.phase[900] - result.phase[100]) / 0.8;
        assert!((slope - 2.0 * PI * 50.0).abs() < 1e-3);
        for w in result.phase.windows(2) {
            assert!((w[1] - w[0]).abs() < PI);
        }
    }
}
