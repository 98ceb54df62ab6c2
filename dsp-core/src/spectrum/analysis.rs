//! High-level spectrum analyzer
//!
//! Windows a time-domain frame and reports its magnitude spectrum, for
//! metering and visualization hosts that want bins rather than samples.

use super::fft::fft;
use super::windowing::{apply_window_inplace, WindowType};
use crate::error::DspError;

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Transform size in samples, must be a power of two
    pub fft_size: usize,

    /// Analysis window applied before the transform
    pub window_type: WindowType,

    /// Sample rate in Hz, used only for the frequency axis
    pub sample_rate: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window_type: WindowType::Hanning,
            sample_rate: 48000.0,
        }
    }
}

/// Magnitude-spectrum analyzer over the crate's transform engine
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
}

impl SpectrumAnalyzer {
    /// Create a new analyzer.
    ///
    /// # Errors
    /// Returns [`DspError::InvalidLength`] when `fft_size` is zero or not a
    /// power of two.
    pub fn new(config: AnalyzerConfig) -> Result<Self, DspError> {
        if config.fft_size == 0 || !config.fft_size.is_power_of_two() {
            return Err(DspError::InvalidLength {
                len: config.fft_size,
            });
        }

        Ok(Self { config })
    }

    /// Analyze a frame and return its magnitude spectrum.
    ///
    /// The frame is zero-padded (or truncated) to the configured transform
    /// size before windowing.
    ///
    /// # Returns
    /// Magnitudes |X[k]| for k = 0..fft_size/2 inclusive (positive
    /// frequencies only)
    pub fn analyze(&self, frame: &[f32]) -> Vec<f32> {
        let size = self.config.fft_size;

        let mut reals = vec![0.0_f32; size];
        let copy_len = frame.len().min(size);
        reals[..copy_len].copy_from_slice(&frame[..copy_len]);

        apply_window_inplace(&mut reals, self.config.window_type);

        let mut imags = vec![0.0_f32; size];
        fft(&mut reals, &mut imags);

        (0..=size / 2)
            .map(|k| super::polar::magnitude(reals[k], imags[k]))
            .collect()
    }

    /// Analyze a frame and return its magnitude spectrum in dB.
    ///
    /// # Arguments
    /// * `frame` - Input frame
    /// * `reference` - Reference level for dB (1.0 for dBFS-style readings)
    pub fn analyze_db(&self, frame: &[f32], reference: f32) -> Vec<f32> {
        self.analyze(frame)
            .iter()
            .map(|&mag| {
                let clamped = mag.max(1e-10); // avoid log(0)
                20.0 * (clamped / reference).log10()
            })
            .collect()
    }

    /// Frequency in Hz of each analysis bin
    pub fn frequency_bins_hz(&self) -> Vec<f32> {
        let size = self.config.fft_size as f32;

        (0..=self.config.fft_size / 2)
            .map(|k| k as f32 * self.config.sample_rate / size)
            .collect()
    }

    /// Number of reported bins (fft_size/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.config.fft_size / 2 + 1
    }

    /// Current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}
