//! Stereo vocal cancellation
//!
//! Two strategies over a stereo pair: a spectral gate that attenuates bins
//! whose left/right magnitudes are nearly identical (center-panned content,
//! typically the lead vocal), and the classic time-domain channel-difference
//! canceler. Side-panned instrumentation passes through either way.

use crate::error::{check_frame, DspError};
use crate::spectrum::fft::{fft, ifft};
use crate::spectrum::polar::{from_polar, magnitude, phase};
use crate::spectrum::windowing::{apply_window_inplace, WindowType};

/// Floor for gated bins. Kept positive so reconstruction from polar form
/// never collapses onto the zero-magnitude phase singularity.
const MINIMUM_AMPLITUDE: f32 = 1e-6;

/// Center-channel canceler over a stereo frame pair
#[derive(Debug, Clone)]
pub struct VocalCanceler {
    /// Sample rate in Hz
    sample_rate: f32,

    /// Lower edge of the gated band in Hz
    min_frequency: f32,

    /// Upper edge of the gated band in Hz
    max_frequency: f32,

    /// Similarity threshold below which a bin counts as center-panned
    threshold: f32,
}

impl VocalCanceler {
    /// Create a canceler for the given band and similarity threshold.
    ///
    /// # Errors
    /// Returns [`DspError::InvalidParameter`] when `sample_rate` is not
    /// positive, the band edges are negative or inverted, or `threshold`
    /// is negative.
    pub fn new(
        sample_rate: f32,
        min_frequency: f32,
        max_frequency: f32,
        threshold: f32,
    ) -> Result<Self, DspError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(DspError::InvalidParameter("sample rate must be > 0"));
        }

        if !min_frequency.is_finite() || !max_frequency.is_finite() || min_frequency < 0.0 {
            return Err(DspError::InvalidParameter(
                "band edges must be finite and >= 0",
            ));
        }

        if min_frequency > max_frequency {
            return Err(DspError::InvalidParameter(
                "min frequency must not exceed max frequency",
            ));
        }

        if !threshold.is_finite() || threshold < 0.0 {
            return Err(DspError::InvalidParameter(
                "similarity threshold must be finite and >= 0",
            ));
        }

        Ok(Self {
            sample_rate,
            min_frequency,
            max_frequency,
            threshold,
        })
    }

    /// Gate center-panned spectral content out of a stereo frame pair.
    ///
    /// Both channels are transformed independently. Inside the configured
    /// band, a bin whose left/right magnitude difference is small relative
    /// to the combined magnitude is clamped to a tiny floor on both
    /// channels (and so is its conjugate mirror bin), then both channels
    /// are rebuilt from the edited magnitudes and the original phases.
    ///
    /// # Returns
    /// `2N` samples: the left frame followed by the right frame.
    ///
    /// # Errors
    /// Returns [`DspError::InvalidLength`] for zero or non-power-of-two
    /// frames and [`DspError::ChannelMismatch`] when the channels differ
    /// in length.
    pub fn process(&self, left: &[f32], right: &[f32]) -> Result<Vec<f32>, DspError> {
        check_frame(left)?;
        check_frame(right)?;

        if left.len() != right.len() {
            return Err(DspError::ChannelMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let size = left.len();

        // Rectangular windowing is an identity, applied anyway so both
        // channels run the same pipeline as the windowed effects
        let mut left_reals = left.to_vec();
        let mut right_reals = right.to_vec();
        apply_window_inplace(&mut left_reals, WindowType::Rectangular);
        apply_window_inplace(&mut right_reals, WindowType::Rectangular);

        let mut left_imags = vec![0.0_f32; size];
        let mut right_imags = vec![0.0_f32; size];
        fft(&mut left_reals, &mut left_imags);
        fft(&mut right_reals, &mut right_imags);

        let mut left_magnitudes = vec![0.0_f32; size];
        let mut right_magnitudes = vec![0.0_f32; size];
        let mut left_phases = vec![0.0_f32; size];
        let mut right_phases = vec![0.0_f32; size];

        for k in 0..size {
            left_magnitudes[k] = magnitude(left_reals[k], left_imags[k]);
            right_magnitudes[k] = magnitude(right_reals[k], right_imags[k]);
            left_phases[k] = phase(left_reals[k], left_imags[k]);
            right_phases[k] = phase(right_reals[k], right_imags[k]);
        }

        let bins_per_hz = size as f32 / self.sample_rate;
        let min_bin = (self.min_frequency * bins_per_hz).floor() as usize;
        let max_bin = ((self.max_frequency * bins_per_hz).floor() as usize).min(size);

        let mut gated = 0usize;

        for k in min_bin..max_bin {
            let difference = left_magnitudes[k] - right_magnitudes[k];
            let sum = left_magnitudes[k] + right_magnitudes[k];

            let denominator = sum * sum;
            if denominator == 0.0 {
                // Both channels silent here; nothing to compare
                continue;
            }

            let similarity = (difference * difference) / denominator;

            if similarity < self.threshold {
                left_magnitudes[k] = MINIMUM_AMPLITUDE;
                right_magnitudes[k] = MINIMUM_AMPLITUDE;

                // Clamp the conjugate mirror too; bin 0 has none
                if k > 0 {
                    left_magnitudes[size - k] = MINIMUM_AMPLITUDE;
                    right_magnitudes[size - k] = MINIMUM_AMPLITUDE;
                }

                gated += 1;
            }
        }

        log::trace!(
            "spectral gate clamped {} of {} bins in [{}, {})",
            gated,
            max_bin.saturating_sub(min_bin),
            min_bin,
            max_bin
        );

        for k in 0..size {
            let (re, im) = from_polar(left_magnitudes[k], left_phases[k]);
            left_reals[k] = re;
            left_imags[k] = im;

            let (re, im) = from_polar(right_magnitudes[k], right_phases[k]);
            right_reals[k] = re;
            right_imags[k] = im;
        }

        ifft(&mut left_reals, &mut left_imags);
        ifft(&mut right_reals, &mut right_imags);

        apply_window_inplace(&mut left_reals, WindowType::Rectangular);
        apply_window_inplace(&mut right_reals, WindowType::Rectangular);

        let mut output = Vec::with_capacity(2 * size);
        output.extend_from_slice(&left_reals);
        output.extend_from_slice(&right_reals);

        Ok(output)
    }

    /// Classic time-domain canceler: subtract a scaled copy of the opposite
    /// channel from each side. `depth` 0 passes the input through, 1 fully
    /// subtracts the opposite channel.
    ///
    /// No transform is involved, so any matching nonzero frame lengths are
    /// accepted.
    ///
    /// # Returns
    /// `2N` samples: the left frame followed by the right frame.
    pub fn process_time_domain(
        left: &[f32],
        right: &[f32],
        depth: f32,
    ) -> Result<Vec<f32>, DspError> {
        if !depth.is_finite() || !(0.0..=1.0).contains(&depth) {
            return Err(DspError::InvalidParameter("depth must lie in [0, 1]"));
        }

        if left.len() != right.len() {
            return Err(DspError::ChannelMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let mut output = Vec::with_capacity(2 * left.len());
        output.extend(left.iter().zip(right.iter()).map(|(&l, &r)| l - depth * r));
        output.extend(right.iter().zip(left.iter()).map(|(&r, &l)| r - depth * l));

        Ok(output)
    }
}
