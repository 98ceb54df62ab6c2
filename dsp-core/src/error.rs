//! Error types shared by the effect APIs
//!
//! Precondition violations inside the transform engine itself are programming
//! errors and panic via assertions; the public effect entry points validate
//! their inputs and return these errors instead.

use thiserror::Error;

/// Errors returned by the effect and analyzer APIs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DspError {
    /// Frame length is zero or not a power of two
    #[error("invalid frame length {len}: expected a nonzero power of two")]
    InvalidLength {
        /// Offending length
        len: usize,
    },

    /// Stereo channels have different frame lengths
    #[error("channel length mismatch: left is {left} samples, right is {right}")]
    ChannelMismatch {
        /// Left channel length
        left: usize,
        /// Right channel length
        right: usize,
    },

    /// An effect parameter is out of its documented range
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Validate a single analysis frame: nonzero, power-of-two length
pub(crate) fn check_frame(frame: &[f32]) -> Result<(), DspError> {
    if frame.is_empty() || !frame.len().is_power_of_two() {
        return Err(DspError::InvalidLength { len: frame.len() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_frame_accepts_powers_of_two() {
        assert!(check_frame(&[0.0; 1]).is_ok());
        assert!(check_frame(&[0.0; 128]).is_ok());
        assert!(check_frame(&[0.0; 2048]).is_ok());
    }

    #[test]
    fn test_check_frame_rejects_invalid_lengths() {
        assert_eq!(check_frame(&[]), Err(DspError::InvalidLength { len: 0 }));
        assert_eq!(check_frame(&[0.0; 3]), Err(DspError::InvalidLength { len: 3 }));
        assert_eq!(check_frame(&[0.0; 100]), Err(DspError::InvalidLength { len: 100 }));
    }
}
