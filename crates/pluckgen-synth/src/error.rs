//! Error types for the synthesis kernel.

use thiserror::Error;

/// Result type for synthesis and container operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while synthesizing or persisting a tone.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Frequency is non-positive, not finite, or yields an unusable period.
    #[error("invalid frequency: {freq} Hz has no usable period at {sample_rate} Hz")]
    InvalidFrequency {
        /// The rejected frequency.
        freq: f64,
        /// Sample rate the period was computed against.
        sample_rate: u32,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// A container could not be decoded.
    #[error("invalid WAV data: {message}")]
    InvalidFormat {
        /// What was wrong with the data.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidFrequency { .. } => "SYNTH_001",
            SynthError::InvalidSampleRate { .. } => "SYNTH_002",
            SynthError::InvalidDuration { .. } => "SYNTH_003",
            SynthError::InvalidFormat { .. } => "SYNTH_004",
            SynthError::Io(_) => "SYNTH_005",
        }
    }

    /// Broad category used when reporting.
    pub fn category(&self) -> &'static str {
        match self {
            SynthError::Io(_) => "io",
            SynthError::InvalidFormat { .. } => "container",
            _ => "synthesis",
        }
    }
}
