//! Error types for the speech engine.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while configuring voices or synthesizing speech.
///
/// Unknown input symbols are not errors; the formant voice skips them and
/// reports them through [`crate::Utterance::skipped`].
#[derive(Debug, Error)]
pub enum SynthError {
    /// Phone rate is not a positive finite number.
    #[error("invalid phone rate: {rate}")]
    InvalidPhoneRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Sample rate is zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The rejected rate.
        rate: u32,
    },

    /// A diphone voice lacks a clip every phone needs.
    #[error("missing recording: {name}")]
    MissingRecording {
        /// Clip name, e.g. `"-AA"` or `"AA-"`.
        name: String,
    },

    /// A diphone voice was asked for a phone outside its inventory.
    #[error("unknown phone: {name}")]
    UnknownPhone {
        /// Phone name.
        name: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a missing recording error.
    pub fn missing_recording(name: impl Into<String>) -> Self {
        Self::MissingRecording { name: name.into() }
    }

    /// Returns a stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidPhoneRate { .. } => "SYNTH_001",
            SynthError::InvalidSampleRate { .. } => "SYNTH_002",
            SynthError::MissingRecording { .. } => "SYNTH_003",
            SynthError::UnknownPhone { .. } => "SYNTH_004",
            SynthError::InvalidParameter { .. } => "SYNTH_005",
        }
    }
}
