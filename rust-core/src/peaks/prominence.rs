//! Prominence-based peak detection
//!
//! A peak's prominence is its height above the higher of the two valleys
//! separating it from taller terrain (or the signal edge) on either side.

/// Local maxima, ascending; flat tops resolve to the middle of the plateau
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let n = signal.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i < n - 1 {
        if signal[i - 1] < signal[i] {
            // Walk across a possible plateau
            let mut ahead = i + 1;
            while ahead < n - 1 && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                let right_edge = ahead - 1;
                maxima.push((i + right_edge) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    maxima
}

/// Prominence of the peak at `peak`
pub fn prominence(signal: &[f64], peak: usize) -> f64 {
    let height = signal[peak];

    let mut left_min = height;
    for &v in signal[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &signal[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_maxima() {
        assert_eq!(local_maxima(&[0.0, 1.0, 0.0, 1.0, 0.0]), vec![1, 3]);
        assert_eq!(local_maxima(&[0.0, 1.0, 2.0]), Vec::<usize>::new());
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_plateau_middle() {
        assert_eq!(local_maxima(&[0.0, 2.0, 2.0, 2.0, 0.0]), vec![2]);
        assert_eq!(local_maxima(&[0.0, 2.0, 2.0, 0.0]), vec![1]);
        // Plateau running into the edge is not a peak
        assert!(local_maxima(&[0.0, 2.0, 2.0, 2.0]).is_empty());
        // Step up is not a peak
        assert!(local_maxima(&[0.0, 2.0, 2.0, 3.0, 1.0]) == vec![3]);
    }

    #[test]
    fn test_prominence() {
        let signal = [0.0, 3.0, 1.0, 5.0, 2.0, 4.0, 0.0];
        assert!((prominence(&signal, 3) - 5.0).abs() < 1e-12);
        // Valley 1.0 on the left before the taller 5.0; right falls to 0
        assert!((prominence(&signal, 1) - 2.0).abs() < 1e-12);
        // Left valley 2.0 before 5.0; right falls to 0
        assert!((prominence(&signal, 5) - 2.0).abs() < 1e-12);
    }
}
