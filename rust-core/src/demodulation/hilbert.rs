//! FFT-based Hilbert transform
//!
//! a(t) = x(t) + i·H[x(t)]. The spectrum of the real input is kept at DC
//! (and Nyquist for even N), doubled over the positive frequencies and
//! zeroed over the negative ones before the inverse transform.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Analytic signal of a real input, same length as `signal`
pub fn analytic_signal(signal: &[f64]) -> Vec<Complex<f64>> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    for (k, bin) in buffer.iter_mut().enumerate() {
        *bin *= hilbert_weight(k, n);
    }

    ifft.process(&mut buffer);

    let scale = 1.0 / n as f64;
    for c in buffer.iter_mut() {
        *c *= scale;
    }
    buffer
}

/// Spectral weight for bin `k` of an `n`-point analytic-signal construction
fn hilbert_weight(k: usize, n: usize) -> f64 {
    if k == 0 {
        1.0
    } else if n % 2 == 0 && k == n / 2 {
        1.0
    } else if k < (n + 1) / 2 {
        2.0
    } else {
        0.0
    }
}

/// Remove 2π jumps so consecutive samples differ by at most π
///
/// A jump of exactly ±π is kept in the direction of the raw difference.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut unwrapped = Vec::with_capacity(phase.len());
    let Some(&first) = phase.first() else {
        return unwrapped;
    };
    unwrapped.push(first);

    let mut correction = 0.0;
    for pair in phase.windows(2) {
        let dd = pair[1] - pair[0];
        let mut ddmod = (dd + PI).rem_euclid(2.0 * PI) - PI;
        if ddmod == -PI && dd > 0.0 {
            ddmod = PI;
        }
        if dd.abs() >= PI {
            correction += ddmod - dd;
        }
        unwrapped.push(pair[1] + correction);
    }

    unwrapped
}
