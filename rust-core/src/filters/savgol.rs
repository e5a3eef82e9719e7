//! Savitzky–Golay smoothing
//!
//! Fits a least-squares polynomial over a centred window and evaluates it at
//! the centre sample. The first and last `window/2` samples are taken from
//! the polynomial fitted to the first and last full window.

use crate::error::ComputationError;

/// Polynomial order used by the filter engine
pub const SAVGOL_POLYORDER: usize = 3;

/// Smooth `signal` with a Savitzky–Golay filter
///
/// # Arguments
/// * `signal` - Input samples, `len >= window`
/// * `window` - Odd window length, greater than `order`
/// * `order` - Polynomial degree
///
/// Callers validate the window; this routine only fails if the normal
/// equations turn out singular.
pub fn savgol_filter(
    signal: &[f64],
    window: usize,
    order: usize,
) -> Result<Vec<f64>, ComputationError> {
    let n = signal.len();
    let half = window / 2;
    let positions = scaled_positions(window);

    let coeffs = centre_coefficients(&positions, order)?;
    let mut output = vec![0.0; n];

    // Interior: FIR with the centre-evaluation coefficients
    for i in half..n - half {
        let segment = &signal[i - half..=i + half];
        output[i] = coeffs.iter().zip(segment).map(|(c, x)| c * x).sum();
    }

    // Edges: evaluate the polynomial of the outermost full window
    let left = polyfit(&positions, &signal[..window], order)?;
    for (i, out) in output.iter_mut().enumerate().take(half) {
        *out = polyval(&left, positions[i]);
    }

    let right = polyfit(&positions, &signal[n - window..], order)?;
    for j in (window - half)..window {
        output[n - window + j] = polyval(&right, positions[j]);
    }

    Ok(output)
}

/// Window sample positions mapped onto [-1, 1] to keep the fit well conditioned
fn scaled_positions(window: usize) -> Vec<f64> {
    let half = (window / 2) as f64;
    let scale = if half > 0.0 { half } else { 1.0 };
    (0..window).map(|j| (j as f64 - half) / scale).collect()
}

/// Normal-equation matrix AᵀA for the Vandermonde design matrix
fn gram_matrix(positions: &[f64], order: usize) -> Vec<Vec<f64>> {
    let size = order + 1;
    let mut gram = vec![vec![0.0; size]; size];
    for &t in positions {
        let powers = powers_of(t, 2 * order);
        for (r, row) in gram.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell += powers[r + c];
            }
        }
    }
    gram
}

fn powers_of(t: f64, max_power: usize) -> Vec<f64> {
    let mut powers = Vec::with_capacity(max_power + 1);
    let mut p = 1.0;
    for _ in 0..=max_power {
        powers.push(p);
        p *= t;
    }
    powers
}

/// Weights w such that Σ w[j]·x[j] is the fitted value at the window centre
fn centre_coefficients(positions: &[f64], order: usize) -> Result<Vec<f64>, ComputationError> {
    let mut unit = vec![0.0; order + 1];
    unit[0] = 1.0;
    let z = solve(gram_matrix(positions, order), unit)
        .ok_or(ComputationError::SingularFit { points: positions.len() })?;

    Ok(positions
        .iter()
        .map(|&t| {
            powers_of(t, order)
                .iter()
                .zip(z.iter())
                .map(|(p, zk)| p * zk)
                .sum()
        })
        .collect())
}

/// Least-squares polynomial coefficients (lowest degree first)
fn polyfit(positions: &[f64], values: &[f64], order: usize) -> Result<Vec<f64>, ComputationError> {
    let mut rhs = vec![0.0; order + 1];
    for (&t, &y) in positions.iter().zip(values) {
        for (k, p) in powers_of(t, order).into_iter().enumerate() {
            rhs[k] += p * y;
        }
    }
    solve(gram_matrix(positions, order), rhs)
        .ok_or(ComputationError::SingularFit { points: positions.len() })
}

fn polyval(coeffs: &[f64], t: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Gaussian elimination with partial pivoting
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let size = b.len();

    for col in 0..size {
        let pivot = (col..size).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-300 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..size {
            let factor = a[row][col] / a[col][col];
            for k in col..size {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = (row + 1..size).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_five_point_coefficients() {
        // Cubic and quadratic share the 5-point weights [-3, 12, 17, 12, -3] / 35
        let coeffs = centre_coefficients(&scaled_positions(5), 3).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0];
        for (c, e) in coeffs.iter().zip(expected.iter()) {
            assert!((c - e / 35.0).abs() < 1e-12, "{} vs {}", c, e / 35.0);
        }
    }

    #[test]
    fn test_cubic_passes_through_unchanged() {
        let signal: Vec<f64> = (0..20)
            .map(|i| {
                let x = i as f64 * 0.3;
                0.5 * x * x * x - 2.0 * x * x + x - 4.0
            })
            .collect();

        let smoothed = savgol_filter(&signal, 7, 3).unwrap();

        assert_eq!(smoothed.len(), signal.len());
        for (s, x) in smoothed.iter().zip(signal.iter()) {
            assert!((s - x).abs() < 1e-8, "{} vs {}", s, x);
        }
    }

    #[test]
    fn test_window_equal_to_signal() {
        let signal = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let smoothed = savgol_filter(&signal, 5, 3).unwrap();
        assert_eq!(smoothed.len(), 5);
        assert!(smoothed.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_polyval_horner() {
        // 1 + 2t + 3t²
        assert!((polyval(&[1.0, 2.0, 3.0], 2.0) - 17.0).abs() < 1e-12);
    }
}
