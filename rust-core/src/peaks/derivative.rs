//! Derivative sign-change peak detection
//!
//! Smooth, differentiate, and keep the points where the slope turns from
//! rising to falling above a fraction of the signal maximum.

use crate::filters::moving_average;

/// Central-difference gradient with one-sided differences at the ends
pub fn gradient(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n < 2 {
        return Vec::new();
    }

    let mut g = Vec::with_capacity(n);
    g.push(signal[1] - signal[0]);
    for i in 1..n - 1 {
        g.push((signal[i + 1] - signal[i - 1]) / 2.0);
    }
    g.push(signal[n - 1] - signal[n - 2]);
    g
}

/// Indices where the smoothed slope changes sign from + to -, filtered by height
pub fn sign_change_peaks(signal: &[f64], smoothing_window: usize, height_ratio: f64) -> Vec<usize> {
    if signal.len() < 2 {
        return Vec::new();
    }

    let smoothed = moving_average(signal, smoothing_window.max(1));
    // "same" convolution with a kernel longer than the signal returns the
    // kernel's length; only the signal's span is meaningful
    let g = gradient(&smoothed[..signal.len().min(smoothed.len())]);

    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_height = height_ratio * max;

    g.windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] > 0.0 && w[1] < 0.0)
        .map(|(i, _)| i)
        .filter(|&i| signal[i] > min_height)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gradient() {
        assert_eq!(gradient(&[1.0, 2.0, 4.0, 7.0]), vec![1.0, 1.5, 2.5, 3.0]);
        assert!(gradient(&[1.0]).is_empty());
    }

    #[test]
    fn test_finds_tall_bumps_only() {
        // Two tall bumps (height 10) and one short bump (height 3)
        let signal: Vec<f64> = (0..300)
            .map(|i| {
                let x = i as f64;
                10.0 * (-((x - 60.3) / 8.0).powi(2)).exp()
                    + 3.0 * (-((x - 150.2) / 8.0).powi(2)).exp()
                    + 10.0 * (-((x - 240.4) / 8.0).powi(2)).exp()
            })
            .collect();

        let peaks = sign_change_peaks(&signal, 5, 0.5);
        assert_eq!(peaks.len(), 2);
        assert!((peaks[0] as i64 - 60).abs() <= 1);
        assert!((peaks[1] as i64 - 240).abs() <= 1);
    }

    #[test]
    fn test_periodic_signal() {
        let signal: Vec<f64> = (0..400).map(|i| (2.0 * PI * (i as f64 + 0.3) / 100.0).sin()).collect();
        let peaks = sign_change_peaks(&signal, 5, 0.5);

        assert_eq!(peaks.len(), 4);
        for (k, &p) in peaks.iter().enumerate() {
            let expected = 25 + 100 * k; // crest at i = 24.7 + 100k
            assert!((p as i64 - expected as i64).abs() <= 1);
        }
    }

    #[test]
    fn test_short_signal() {
        assert!(sign_change_peaks(&[], 5, 0.5).is_empty());
        assert!(sign_change_peaks(&[1.0], 5, 0.5).is_empty());
    }
}
