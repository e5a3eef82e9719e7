//! Smoothing filters over a 1-D sample array
//!
//! All filters are pure: they take a slice and return a new vector of the
//! same length. Storing the result is the caller's job.

pub mod kernels;
pub mod convolution;
pub mod savgol;

pub use kernels::{KernelType, generate_kernel};
pub use convolution::convolve_same;
pub use savgol::{SAVGOL_POLYORDER, savgol_filter};

use crate::error::{EngineError, ParameterError};

/// Filter selectable from the processing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Uniform kernel of `window` taps, "same" convolution
    MovingAverage,

    /// Gaussian kernel with σ = `window` samples, reflected boundaries
    Gaussian,

    /// Local cubic fit over `window` samples
    SavitzkyGolay,
}

impl FilterKind {
    /// Display name, as shown in the filter selector
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::MovingAverage => "Moving Average",
            FilterKind::Gaussian => "Gaussian",
            FilterKind::SavitzkyGolay => "Savitzky-Golay",
        }
    }

    /// Parse a selector label or a short name (`ma`, `gauss`, `savgol`)
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "movingaverage" | "ma" | "mean" => Some(FilterKind::MovingAverage),
            "gaussian" | "gauss" => Some(FilterKind::Gaussian),
            "savitzkygolay" | "savgol" | "sg" => Some(FilterKind::SavitzkyGolay),
            _ => None,
        }
    }
}

/// Check window constraints for `kind` against a signal of length `len`
pub fn validate_window(kind: FilterKind, window: usize, len: usize) -> Result<(), ParameterError> {
    if len == 0 {
        return Err(ParameterError::EmptySignal);
    }
    if window < 1 {
        return Err(ParameterError::WindowTooSmall(window));
    }
    if window > len {
        return Err(ParameterError::WindowExceedsSignal { window, len });
    }
    if kind == FilterKind::SavitzkyGolay {
        if window % 2 == 0 {
            return Err(ParameterError::EvenWindow(window));
        }
        if window <= SAVGOL_POLYORDER {
            return Err(ParameterError::WindowNotAboveOrder {
                window,
                order: SAVGOL_POLYORDER,
            });
        }
    }
    Ok(())
}

/// Apply a smoothing filter
///
/// # Arguments
/// * `signal` - Raw samples
/// * `kind` - Filter to apply
/// * `window` - Window length (σ in samples for the Gaussian)
///
/// # Returns
/// Filtered samples, same length as `signal`
pub fn apply(signal: &[f64], kind: FilterKind, window: usize) -> Result<Vec<f64>, EngineError> {
    validate_window(kind, window, signal.len())?;
    log::debug!("{} filter, window {}, {} samples", kind.label(), window, signal.len());

    let output = match kind {
        FilterKind::MovingAverage => moving_average(signal, window),
        FilterKind::Gaussian => gaussian_smooth(signal, window as f64),
        FilterKind::SavitzkyGolay => savgol_filter(signal, window, SAVGOL_POLYORDER)?,
    };

    Ok(output)
}

/// Boxcar average with zero-padded boundaries
pub fn moving_average(signal: &[f64], window: usize) -> Vec<f64> {
    let kernel = generate_kernel(KernelType::Uniform { length: window });
    convolve_same(signal, &kernel)
}

/// Gaussian smoothing with half-sample symmetric ("reflect") boundaries
pub fn gaussian_smooth(signal: &[f64], sigma: f64) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let radius = kernels::gaussian_radius(sigma);
    let kernel = generate_kernel(KernelType::Gaussian { sigma });

    let n = signal.len() as isize;
    let r = radius as isize;
    let extended: Vec<f64> = (-r..n + r)
        .map(|i| signal[reflect_index(i, signal.len())])
        .collect();

    // The extended signal is `radius` longer on each side; the symmetric
    // kernel centres output i at index i + radius of the "same" result
    let smoothed = convolve_same(&extended, &kernel);
    smoothed[radius..radius + signal.len()].to_vec()
}

/// Map any integer index onto [0, len) by mirroring: d c b a | a b c d | d c b a
fn reflect_index(i: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = i.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}
