//! Linear convolution with "same" output alignment
//!
//! Short kernels use direct convolution. Long kernels switch to a single
//! zero-padded FFT block: O(N log N) instead of O(N*M).

use rustfft::{num_complex::Complex, FftPlanner};

/// Kernels longer than this are convolved in the frequency domain
pub const DIRECT_CONVOLUTION_MAX_TAPS: usize = 128;

/// Convolve `signal` with `kernel`, returning the centre of the full result
///
/// Output length is `max(len(signal), len(kernel))`, offset by
/// `(min_len - 1) / 2` into the full convolution. Samples outside the signal
/// are treated as zero.
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let full = if kernel.len().min(signal.len()) > DIRECT_CONVOLUTION_MAX_TAPS {
        convolve_full_fft(signal, kernel)
    } else {
        convolve_full_direct(signal, kernel)
    };

    let out_len = signal.len().max(kernel.len());
    let offset = (signal.len().min(kernel.len()) - 1) / 2;
    full[offset..offset + out_len].to_vec()
}

/// Full linear convolution by direct summation: y[k] = Σ h[j] * x[k-j]
pub fn convolve_full_direct(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let n = signal.len();
    let m = kernel.len();
    let mut output = vec![0.0; n + m - 1];

    for (k, out) in output.iter_mut().enumerate() {
        let j_min = k.saturating_sub(n - 1);
        let j_max = k.min(m - 1);
        let mut acc = 0.0;
        for j in j_min..=j_max {
            acc += kernel[j] * signal[k - j];
        }
        *out = acc;
    }

    output
}

/// Full linear convolution by frequency-domain multiplication
///
/// FFT size is the next power of 2 >= (N + M - 1), so the circular
/// convolution never wraps.
pub fn convolve_full_fft(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let full_len = signal.len() + kernel.len() - 1;
    let fft_size = full_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    let ifft = planner.plan_fft_inverse(fft_size);

    let mut x = zero_padded_complex(signal, fft_size);
    let mut h = zero_padded_complex(kernel, fft_size);

    fft.process(&mut x);
    fft.process(&mut h);

    for (xi, hi) in x.iter_mut().zip(h.iter()) {
        *xi *= *hi;
    }

    ifft.process(&mut x);

    // IFFT normalization
    let scale = 1.0 / fft_size as f64;
    x[..full_len].iter().map(|c| c.re * scale).collect()
}

fn zero_padded_complex(values: &[f64], size: usize) -> Vec<Complex<f64>> {
    let mut buffer = vec![Complex::new(0.0, 0.0); size];
    for (slot, &v) in buffer.iter_mut().zip(values.iter()) {
        *slot = Complex::new(v, 0.0);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_direct_impulse() {
        let h = vec![0.1, 0.2, 0.4, 0.2, 0.1];
        let output = convolve_full_direct(&[1.0, 0.0, 0.0], &h);

        assert_eq!(output.len(), 7);
        for (i, &expected) in h.iter().enumerate() {
            assert!((output[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_alignment_matches_centred_window() {
        // [1,2,3,4] * [1/3,1/3,1/3], zero outside the signal
        let output = convolve_same(&[1.0, 2.0, 3.0, 4.0], &[1.0 / 3.0; 3]);

        let expected = [1.0, 2.0, 3.0, 7.0 / 3.0];
        assert_eq!(output.len(), 4);
        for (o, e) in output.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-12, "{} vs {}", o, e);
        }
    }

    #[test]
    fn test_same_with_even_kernel() {
        // Full result [0.5, 1.5, 2.5, 3.5, 2.0]; offset (2-1)/2 = 0
        let output = convolve_same(&[1.0, 2.0, 3.0, 4.0], &[0.5, 0.5]);
        assert_eq!(output, vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_kernel_longer_than_signal() {
        let output = convolve_same(&[1.0, 1.0], &[0.2; 5]);
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn test_fft_vs_direct() {
        let signal: Vec<f64> = (0..700).map(|i| (i as f64 * 0.01).sin()).collect();
        let kernel: Vec<f64> = (0..200).map(|i| ((i as f64) * 0.05).cos() / 200.0).collect();

        let fast = convolve_full_fft(&signal, &kernel);
        let direct = convolve_full_direct(&signal, &kernel);

        assert_eq!(fast.len(), direct.len());
        for i in 0..fast.len() {
            let diff = (fast[i] - direct[i]).abs();
            assert!(diff < 1e-9, "Mismatch at {}: diff = {}", i, diff);
        }
    }
}
