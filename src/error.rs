//! Error types for the bandext crate.

use std::fmt;

/// Errors that can occur during bandwidth extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendError {
    /// Invalid processing configuration (FFT size, hop size, gain, band edges).
    InvalidConfig(String),
    /// Channel count must be at least 1.
    InvalidChannels(u16),
    /// Sample rate must be positive.
    InvalidSampleRate(u32),
    /// Input contains NaN or infinite samples.
    NonFiniteInput,
    /// Invalid or unsupported audio file format.
    InvalidFormat(String),
    /// I/O error.
    IoError(String),
    /// Spectrogram rendering failed.
    RenderError(String),
}

impl fmt::Display for ExtendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            ExtendError::InvalidChannels(c) => {
                write!(f, "invalid channel count: {}. Must be at least 1.", c)
            }
            ExtendError::InvalidSampleRate(sr) => {
                write!(f, "invalid sample rate: {}. Must be greater than 0.", sr)
            }
            ExtendError::NonFiniteInput => {
                write!(f, "input contains NaN or infinite samples")
            }
            ExtendError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            ExtendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            ExtendError::RenderError(msg) => write!(f, "render error: {}", msg),
        }
    }
}

impl std::error::Error for ExtendError {}

impl From<std::io::Error> for ExtendError {
    fn from(err: std::io::Error) -> Self {
        ExtendError::IoError(err.to_string())
    }
}
