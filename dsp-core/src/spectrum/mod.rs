//! Spectral transform engine: FFT pair, windows, polar helpers

pub mod analysis;
pub mod fft;
pub mod polar;
pub mod windowing;

pub use analysis::{AnalyzerConfig, SpectrumAnalyzer};
pub use fft::{fft, ifft};
pub use windowing::{apply_window_inplace, generate_window, WindowType};
