//! Window functions for short-time spectral processing
//!
//! All windows here are cosine sums:
//! w(t) = a0 - a1*cos(2πt) + a2*cos(4πt)
//! where t runs over [0, 1) for periodic windows and [0, 1] for symmetric ones.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w = 0.5 - 0.5*cos(2πt)
    /// Squared copies at hop N/4 sum to a constant (1.5), which is what the
    /// streaming phaser relies on.
    #[default]
    Hann,

    /// Hamming window: w = 0.54 - 0.46*cos(2πt)
    Hamming,

    /// Blackman window: w = 0.42 - 0.5*cos(2πt) + 0.08*cos(4πt)
    /// Not constant-overlap-add for squared windows at N/4.
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// How the window phase is normalised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowSymmetry {
    /// Phase divided by `length`: unequal endpoints, for analysis/synthesis
    /// with overlap-add.
    #[default]
    Periodic,

    /// Phase divided by `length - 1`: equal endpoints, for FIR design.
    Symmetric,
}

impl WindowType {
    /// Cosine-sum coefficients (a0, a1, a2)
    fn coefficients(&self) -> (f64, f64, f64) {
        match self {
            WindowType::Hann => (0.5, 0.5, 0.0),
            WindowType::Hamming => (0.54, 0.46, 0.0),
            WindowType::Blackman => (0.42, 0.5, 0.08),
            WindowType::Rectangular => (1.0, 0.0, 0.0),
        }
    }

    #[inline]
    fn value_at(&self, t: f64) -> f64 {
        let (a0, a1, a2) = self.coefficients();
        a0 - a1 * (2.0 * PI * t).cos() + a2 * (4.0 * PI * t).cos()
    }
}

impl WindowSymmetry {
    fn denominator(&self, length: usize) -> f64 {
        match self {
            WindowSymmetry::Periodic => length as f64,
            // A one-point symmetric window would divide by zero
            WindowSymmetry::Symmetric => (length.max(2) - 1) as f64,
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples
/// * `symmetry` - Periodic (overlap-add) or symmetric (filter design)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..length-1
pub fn generate_window(window_type: WindowType, length: usize, symmetry: WindowSymmetry) -> Vec<f32> {
    let denom = symmetry.denominator(length);
    (0..length)
        .map(|n| window_type.value_at(n as f64 / denom) as f32)
        .collect()
}

/// Multiply a buffer by the window without materialising the window
pub fn apply_window_inplace(signal: &mut [f32], window_type: WindowType, symmetry: WindowSymmetry) {
    let denom = symmetry.denominator(signal.len());
    for (n, s) in signal.iter_mut().enumerate() {
        *s *= window_type.value_at(n as f64 / denom) as f32;
    }
}

/// Derivative of the periodic window with respect to normalised time t = n / length
///
/// This is the exact derivative of [`generate_window`], so Hann gives
/// π*sin(2πt). Reassignment code written against the unnormalised Hann
/// 1 - cos(2πt) expects 2π*sin(2πt) and must double this.
pub fn window_derivative(window_type: WindowType, length: usize) -> Vec<f32> {
    let (_, a1, a2) = window_type.coefficients();
    (0..length)
        .map(|n| {
            let t = n as f64 / length as f64;
            (2.0 * PI * a1 * (2.0 * PI * t).sin() - 4.0 * PI * a2 * (4.0 * PI * t).sin()) as f32
        })
        .collect()
}

/// Overlap-add gain of a squared window at a given hop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapGain {
    /// Average of the summed squared window over one hop
    pub mean: f32,

    /// Peak-to-peak variation relative to `mean` (0 for a perfect fit)
    pub ripple: f32,
}

/// Sum w[n]^2 over every hop-shifted copy of the window
///
/// Analysis and synthesis use the same window, so each output sample is
/// scaled by this sum once all overlapping blocks have been added.
pub fn overlap_add_gain(window: &[f32], hop: usize) -> OverlapGain {
    if window.is_empty() || hop == 0 {
        return OverlapGain { mean: 0.0, ripple: 0.0 };
    }

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut total = 0.0;
    let span = hop.min(window.len());

    for n in 0..span {
        let sum: f64 = window[n..]
            .iter()
            .step_by(hop)
            .map(|&w| (w as f64) * (w as f64))
            .sum();
        min = min.min(sum);
        max = max.max(sum);
        total += sum;
    }

    let mean = total / span as f64;
    let ripple = if mean > 0.0 { (max - min) / mean } else { 0.0 };

    OverlapGain {
        mean: mean as f32,
        ripple: ripple as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_periodic_hann_endpoints() {
        let w = generate_window(WindowType::Hann, 8, WindowSymmetry::Periodic);

        assert_eq!(w.len(), 8);
        assert_abs_diff_eq!(w[0], 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(w[4], 1.0, epsilon = 1e-7);
        // Periodic: last sample is not zero, and w[n] == w[N-n]
        assert!(w[7] > 0.1);
        assert_abs_diff_eq!(w[1], w[7], epsilon = 1e-7);
    }

    #[test]
    fn test_symmetric_hann_endpoints() {
        let length = 161;
        let w = generate_window(WindowType::Hann, length, WindowSymmetry::Symmetric);

        assert_abs_diff_eq!(w[0], w[length - 1], epsilon = 1e-7);
        assert_abs_diff_eq!(w[length / 2], 1.0, epsilon = 1e-7);
    }

    #[test]
    fn test_apply_inplace_matches_generated() {
        for symmetry in [WindowSymmetry::Periodic, WindowSymmetry::Symmetric] {
            let window = generate_window(WindowType::Blackman, 64, symmetry);
            let mut signal = vec![2.0f32; 64];
            apply_window_inplace(&mut signal, WindowType::Blackman, symmetry);

            for (s, w) in signal.iter().zip(window.iter()) {
                assert_abs_diff_eq!(*s, 2.0 * w, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_hann_derivative() {
        let length = 1024;
        let d = window_derivative(WindowType::Hann, length);

        assert_abs_diff_eq!(d[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d[length / 4], std::f32::consts::PI, epsilon = 1e-5);
        assert_abs_diff_eq!(d[3 * length / 4], -std::f32::consts::PI, epsilon = 1e-5);
        assert!(window_derivative(WindowType::Rectangular, 16).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let length = 512;
        for window_type in [WindowType::Hann, WindowType::Hamming, WindowType::Blackman] {
            let w = generate_window(window_type, length, WindowSymmetry::Periodic);
            let d = window_derivative(window_type, length);

            for n in 1..length - 1 {
                // dt = 1 / length per sample
                let slope = (w[n + 1] - w[n - 1]) * length as f32 / 2.0;
                assert_abs_diff_eq!(d[n], slope, epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn test_hann_quarter_hop_is_constant() {
        let w = generate_window(WindowType::Hann, 1024, WindowSymmetry::Periodic);
        let gain = overlap_add_gain(&w, 256);

        assert_abs_diff_eq!(gain.mean, 1.5, epsilon = 1e-5);
        assert!(gain.ripple < 1e-5);
    }

    #[test]
    fn test_blackman_quarter_hop_ripples() {
        let w = generate_window(WindowType::Blackman, 1024, WindowSymmetry::Periodic);
        let gain = overlap_add_gain(&w, 256);

        assert!(gain.ripple > 1e-3);
    }
}
