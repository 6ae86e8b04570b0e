use crate::animation::player::Track;

/// Convenience result type used across spriteclock.
pub type SpriteClockResult<T> = Result<T, SpriteClockError>;

/// Errors raised while turning frame and sequence records into a playable library.
///
/// Every variant is fatal for the load operation that produced it: there is no
/// partially built library.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A layer with non-empty color and geometry strings failed to parse.
    #[error("frame {frame} layer {layer} is malformed: {reason}")]
    MalformedLayer {
        /// Frame position in the frame records.
        frame: usize,
        /// Layer position inside that frame's records.
        layer: usize,
        /// Parser diagnostic.
        reason: String,
    },

    /// A sequence entry does not address a frame of the library.
    #[error("{track} sequence entry {position} references frame {index}, library has {frames}")]
    InvalidIndex {
        /// Track whose sequence holds the entry.
        track: Track,
        /// Position of the entry inside the sequence.
        position: usize,
        /// Offending frame index.
        index: usize,
        /// Number of frames in the library.
        frames: usize,
    },

    /// The record stream could not be decoded at all.
    #[error("malformed records: {0}")]
    Records(String),
}

/// Top-level error taxonomy used by the public API.
#[derive(thiserror::Error, Debug)]
pub enum SpriteClockError {
    /// Frame library or sequence table could not be built.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a rendering surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteClockError {
    /// Build a [`SpriteClockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteClockError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SpriteClockError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
