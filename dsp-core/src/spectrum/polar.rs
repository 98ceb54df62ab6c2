//! Magnitude/phase decomposition of spectrum bins

/// Magnitude of one complex coefficient
#[inline]
pub fn magnitude(real: f32, imag: f32) -> f32 {
    (real * real + imag * imag).sqrt()
}

/// Phase of one complex coefficient.
///
/// Returns `0.0` when both components are exactly zero, so an empty bin
/// never produces the `atan2(0, 0)` ambiguity or a NaN downstream.
#[inline]
pub fn phase(real: f32, imag: f32) -> f32 {
    if real == 0.0 && imag == 0.0 {
        return 0.0;
    }

    imag.atan2(real)
}

/// Rebuild a complex coefficient from magnitude and phase.
///
/// Euler's formula: mag * exp(j * phase) = mag * (cos(phase) + j * sin(phase))
#[inline]
pub fn from_polar(magnitude: f32, phase: f32) -> (f32, f32) {
    let (sin_phase, cos_phase) = phase.sin_cos();

    (magnitude * cos_phase, magnitude * sin_phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_zero_bin_has_zero_phase() {
        assert_eq!(phase(0.0, 0.0), 0.0);
        assert!(!phase(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_axis_phases() {
        assert_eq!(phase(1.0, 0.0), 0.0);
        assert!((phase(0.0, 1.0) - PI / 2.0).abs() < 1e-6);
        assert!((phase(-1.0, 0.0).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_polar_round_trip() {
        let cases = [(3.0, 4.0), (-0.5, 0.25), (0.0, -2.0), (1e-3, 1e-3)];

        for (real, imag) in cases {
            let (re, im) = from_polar(magnitude(real, imag), phase(real, imag));

            assert!((re - real).abs() < 1e-5);
            assert!((im - imag).abs() < 1e-5);
        }
    }
}
