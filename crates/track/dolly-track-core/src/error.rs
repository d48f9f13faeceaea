//! Error types for track evaluation and the textual track format

use serde::{Deserialize, Serialize};

/// Everything that can go wrong while parsing, evaluating or capturing tracks.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TrackError {
    /// Malformed track or shot text
    #[error("{message} at '{context}'")]
    Parse { message: String, context: String },

    /// Evaluation attempted on a track without keyframes
    #[error("track is empty - cannot evaluate")]
    EmptyTrack,

    /// Transition kind with no interpolator
    #[error("undefined transition kind: {name}")]
    UnknownTransition { name: String },

    /// A locked pose references an object the resolver does not know
    #[error("reference to track cannot be found: {id}")]
    ReferenceNotFound { id: i64 },

    /// Decoded frame number does not fit the frame type
    #[error("frame number out of range: {value}")]
    FrameOutOfRange { value: i64 },

    /// A value the text format has no spelling for
    #[error("frame {frame}: value {value} cannot be written as track text")]
    Unencodable { frame: i32, value: f64 },

    /// Configuration could not be read
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl TrackError {
    /// Build a parse error from a message and the input excerpt at the failure point.
    pub fn parse(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse { .. } | Self::FrameOutOfRange { .. } => "parse",
            Self::EmptyTrack | Self::Unencodable { .. } => "data",
            Self::UnknownTransition { .. } => "interpolation",
            Self::ReferenceNotFound { .. } => "reference",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}
