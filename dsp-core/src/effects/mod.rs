//! Spectral-domain effects built on the transform engine

pub mod noise_suppressor;
pub mod pitch_shifter;
pub mod vocal_canceler;

pub use noise_suppressor::NoiseSuppressor;
pub use pitch_shifter::PitchShifter;
pub use vocal_canceler::VocalCanceler;
