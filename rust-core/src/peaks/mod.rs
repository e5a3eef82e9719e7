//! Peak extraction over a 1-D signal
//!
//! Two interchangeable policies. Both return an empty set for inputs too short
//! to hold a peak instead of failing.

pub mod prominence;
pub mod derivative;

use crate::error::ParameterError;

/// Default minimum prominence, in signal units
pub const DEFAULT_MIN_PROMINENCE: f64 = 1.0;

/// Moving-average length used before differentiating
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Peaks must exceed this fraction of the signal maximum
pub const DEFAULT_HEIGHT_RATIO: f64 = 0.5;

/// Peak detection policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakPolicy {
    /// Local maxima with prominence >= `min_prominence`
    Prominence { min_prominence: f64 },

    /// Slope sign changes on a smoothed copy, above `height_ratio * max`
    DerivativeSignChange {
        smoothing_window: usize,
        height_ratio: f64,
    },
}

impl Default for PeakPolicy {
    fn default() -> Self {
        PeakPolicy::Prominence {
            min_prominence: DEFAULT_MIN_PROMINENCE,
        }
    }
}

impl PeakPolicy {
    /// Derivative policy with the default smoothing and height ratio
    pub fn derivative() -> Self {
        PeakPolicy::DerivativeSignChange {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            height_ratio: DEFAULT_HEIGHT_RATIO,
        }
    }

    /// Reject NaN or infinite thresholds
    pub fn validate(&self) -> Result<(), ParameterError> {
        let threshold = match *self {
            PeakPolicy::Prominence { min_prominence } => min_prominence,
            PeakPolicy::DerivativeSignChange { height_ratio, .. } => height_ratio,
        };
        if threshold.is_finite() {
            Ok(())
        } else {
            Err(ParameterError::InvalidThreshold(threshold))
        }
    }
}

/// A detected peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Position in the signal the set was computed against
    pub index: usize,

    /// Signal value at `index`
    pub value: f64,
}

/// Peaks in ascending index order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakSet {
    peaks: Vec<Peak>,
}

impl PeakSet {
    fn from_indices(signal: &[f64], indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            peaks: indices
                .into_iter()
                .map(|index| Peak {
                    index,
                    value: signal[index],
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn indices(&self) -> Vec<usize> {
        self.peaks.iter().map(|p| p.index).collect()
    }

    /// Peaks placed on a plotting axis: (axis[index], value)
    ///
    /// Peaks beyond the end of `axis` are skipped.
    pub fn coordinates(&self, axis: &[f64]) -> Vec<(f64, f64)> {
        self.peaks
            .iter()
            .filter_map(|p| axis.get(p.index).map(|&x| (x, p.value)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PeakSet {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

/// Find peaks in `signal` with the given policy
///
/// Fails only for a non-finite threshold; short inputs give an empty set.
pub fn find_peaks(signal: &[f64], policy: &PeakPolicy) -> Result<PeakSet, ParameterError> {
    policy.validate()?;
    if signal.is_empty() {
        return Ok(PeakSet::default());
    }

    let indices = match *policy {
        PeakPolicy::Prominence { min_prominence } => prominence::local_maxima(signal)
            .into_iter()
            .filter(|&i| prominence::prominence(signal, i) >= min_prominence)
            .collect::<Vec<_>>(),
        PeakPolicy::DerivativeSignChange {
            smoothing_window,
            height_ratio,
        } => derivative::sign_change_peaks(signal, smoothing_window, height_ratio),
    };

    log::debug!("Found {} peaks in {} samples", indices.len(), signal.len());
    Ok(PeakSet::from_indices(signal, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_peaks_lowered_threshold() {
        let policy = PeakPolicy::Prominence { min_prominence: 0.5 };
        let peaks = find_peaks(&[0.0, 1.0, 0.0, 1.0, 0.0], &policy).unwrap();

        assert_eq!(peaks.indices(), vec![1, 3]);
        assert_eq!(peaks.peaks()[0], Peak { index: 1, value: 1.0 });
    }

    #[test]
    fn test_default_threshold_is_inclusive() {
        // Prominence exactly 1.0 passes the default threshold
        let peaks = find_peaks(&[0.0, 1.0, 0.0, 1.0, 0.0], &PeakPolicy::default()).unwrap();
        assert_eq!(peaks.indices(), vec![1, 3]);
    }

    #[test]
    fn test_prominence_filters_ripples() {
        let signal = [0.0, 5.0, 4.8, 4.9, 4.7, 0.0];
        let peaks = find_peaks(&signal, &PeakPolicy::default()).unwrap();
        assert_eq!(peaks.indices(), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(find_peaks(&[], &PeakPolicy::default()).unwrap().is_empty());
        assert!(find_peaks(&[], &PeakPolicy::derivative()).unwrap().is_empty());
    }

    #[test]
    fn test_coordinates() {
        let policy = PeakPolicy::Prominence { min_prominence: 0.5 };
        let peaks = find_peaks(&[0.0, 1.0, 0.0, 2.0, 0.0], &policy).unwrap();
        let axis = [0.0, 0.1, 0.2, 0.3, 0.4];

        assert_eq!(peaks.coordinates(&axis), vec![(0.1, 1.0), (0.3, 2.0)]);
        assert_eq!(peaks.coordinates(&axis[..2]), vec![(0.1, 1.0)]);
    }

    #[test]
    fn test_indices_strictly_increasing() {
        let signal: Vec<f64> = (0..500).map(|i| ((i as f64) * 0.37).sin() * 3.0).collect();
        for policy in [PeakPolicy::default(), PeakPolicy::derivative()] {
            let indices = find_peaks(&signal, &policy).unwrap().indices();
            assert!(!indices.is_empty());
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_validate_threshold() {
        assert!(PeakPolicy::default().validate().is_ok());
        assert!(PeakPolicy::Prominence { min_prominence: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let signal = [0.0, 1.0, 0.0, 1.0, 0.0];

        let nan = PeakPolicy::Prominence { min_prominence: f64::NAN };
        assert!(matches!(
            find_peaks(&signal, &nan),
            Err(ParameterError::InvalidThreshold(t)) if t.is_nan()
        ));

        let inf = PeakPolicy::DerivativeSignChange {
            smoothing_window: 5,
            height_ratio: f64::INFINITY,
        };
        assert_eq!(
            find_peaks(&signal, &inf).unwrap_err(),
            ParameterError::InvalidThreshold(f64::INFINITY)
        );
    }
}
