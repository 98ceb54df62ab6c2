//! Spectral Effects Core - Block-wise Audio Spectral Processing
//!
//! Converts fixed-length sample frames to the frequency domain, edits the
//! spectrum, and converts back. The transform engine is an in-place radix-2
//! FFT pair over parallel real/imaginary arrays; on top of it sit three
//! effects: spectral-subtraction noise suppression, a peak-tracking
//! phase-vocoder pitch shifter, and stereo center-channel cancellation.
//!
//! The host owns all buffers and feeds one analysis frame (or a stereo
//! pair) per call; every call is a pure function of its inputs. Overlap-add
//! reconstruction and frame scheduling are the host's concern, as is the
//! `time_cursor` continuity counter the pitch shifter takes per call.

pub mod effects;
pub mod error;
pub mod spectrum;

pub use effects::{NoiseSuppressor, PitchShifter, VocalCanceler};
pub use error::DspError;
pub use spectrum::{fft, ifft, SpectrumAnalyzer, WindowType};
