//! Spectral-subtraction noise suppressor
//!
//! Removes stationary background noise by subtracting a fixed floor from the
//! magnitude spectrum of each frame while keeping the original phases.

use crate::error::{check_frame, DspError};
use crate::spectrum::fft::{fft, ifft};
use crate::spectrum::polar::{from_polar, magnitude, phase};
use crate::spectrum::windowing::{apply_window_inplace, WindowType};

/// Magnitude-threshold noise suppressor
#[derive(Debug, Clone)]
pub struct NoiseSuppressor {
    /// Spectral floor subtracted from every bin magnitude
    threshold: f32,
}

impl NoiseSuppressor {
    /// Create a suppressor with the given spectral floor.
    ///
    /// # Errors
    /// Returns [`DspError::InvalidParameter`] when `threshold` is negative
    /// or not finite.
    pub fn new(threshold: f32) -> Result<Self, DspError> {
        validate_threshold(threshold)?;

        Ok(Self { threshold })
    }

    /// Current spectral floor
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Update the spectral floor
    pub fn set_threshold(&mut self, threshold: f32) -> Result<(), DspError> {
        validate_threshold(threshold)?;
        self.threshold = threshold;

        Ok(())
    }

    /// Suppress the noise floor of one analysis frame.
    ///
    /// The frame is Hanning-windowed, transformed, every bin magnitude is
    /// reduced by the threshold (clamped at zero), the spectrum is rebuilt
    /// from the reduced magnitudes and original phases, and the inverse
    /// transform is Hanning-windowed again so frame edges stay smooth under
    /// host-side overlap-add.
    ///
    /// # Errors
    /// Returns [`DspError::InvalidLength`] when the frame length is zero or
    /// not a power of two.
    pub fn process(&self, input: &[f32]) -> Result<Vec<f32>, DspError> {
        check_frame(input)?;

        let size = input.len();

        let mut reals = input.to_vec();
        apply_window_inplace(&mut reals, WindowType::Hanning);

        let mut imags = vec![0.0_f32; size];
        fft(&mut reals, &mut imags);

        for k in 0..size {
            let bin_magnitude = magnitude(reals[k], imags[k]);
            let bin_phase = phase(reals[k], imags[k]);

            let suppressed = (bin_magnitude - self.threshold).max(0.0);

            let (re, im) = from_polar(suppressed, bin_phase);
            reals[k] = re;
            imags[k] = im;
        }

        ifft(&mut reals, &mut imags);
        apply_window_inplace(&mut reals, WindowType::Hanning);

        Ok(reals)
    }
}

fn validate_threshold(threshold: f32) -> Result<(), DspError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(DspError::InvalidParameter(
            "noise suppression threshold must be finite and >= 0",
        ));
    }

    Ok(())
}
