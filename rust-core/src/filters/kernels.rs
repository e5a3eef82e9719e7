//! Smoothing kernels for the filter engine
//!
//! Every kernel is normalised to unit sum so smoothing preserves the
//! signal's mean level.

/// Gaussian kernels are truncated at this many standard deviations
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Kernel shapes produced by [`generate_kernel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelType {
    /// Boxcar: w[n] = 1/M
    Uniform { length: usize },

    /// Sampled Gaussian: w[n] ∝ exp(-n²/(2σ²)), n ∈ [-r, r], r = round(4σ)
    Gaussian { sigma: f64 },
}

/// Half-width of a truncated Gaussian kernel
pub fn gaussian_radius(sigma: f64) -> usize {
    (GAUSSIAN_TRUNCATE * sigma + 0.5).floor().max(0.0) as usize
}

/// Generate normalised kernel coefficients
///
/// # Arguments
/// * `kernel_type` - Shape and size of the kernel
///
/// # Returns
/// Kernel taps summing to 1 (empty for a zero-length uniform kernel)
pub fn generate_kernel(kernel_type: KernelType) -> Vec<f64> {
    match kernel_type {
        KernelType::Uniform { length } => {
            if length == 0 {
                return Vec::new();
            }
            vec![1.0 / length as f64; length]
        }

        KernelType::Gaussian { sigma } => {
            let radius = gaussian_radius(sigma) as isize;
            let two_var = 2.0 * sigma * sigma;
            let mut kernel: Vec<f64> = (-radius..=radius)
                .map(|n| {
                    let x = n as f64;
                    (-(x * x) / two_var).exp()
                })
                .collect();

            let sum: f64 = kernel.iter().sum();
            for w in kernel.iter_mut() {
                *w /= sum;
            }
            kernel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_kernel() {
        let kernel = generate_kernel(KernelType::Uniform { length: 4 });
        assert_eq!(kernel.len(), 4);
        assert!(kernel.iter().all(|&w| (w - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_gaussian_kernel_shape() {
        let kernel = generate_kernel(KernelType::Gaussian { sigma: 2.0 });

        // r = round(4 * 2) = 8
        assert_eq!(kernel.len(), 17);

        let sum: f64 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);

        // Symmetric with the maximum in the centre
        for i in 0..kernel.len() / 2 {
            assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-15);
            assert!(kernel[i] < kernel[8]);
        }
    }
}
