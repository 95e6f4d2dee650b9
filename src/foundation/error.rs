/// Convenience result type used across Fotorek.
pub type FotorekResult<T> = Result<T, FotorekError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum FotorekError {
    /// Invalid user-provided configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A composition was requested without any captured images.
    #[error("no images to compose")]
    NoImages,

    /// One slot's source image could not be decoded.
    #[error("failed to load image for slot {slot}: {reason}")]
    ImageLoad {
        /// Zero-based slot index of the failing image.
        slot: usize,
        /// Decoder message.
        reason: String,
    },

    /// One slot's source image did not finish decoding in time.
    #[error("timed out loading image for slot {slot} after {timeout_ms}ms")]
    ImageTimeout {
        /// Zero-based slot index of the failing image.
        slot: usize,
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// No drawable surface, or geometry that cannot be rendered.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding the exported image.
    #[error("encode error: {0}")]
    Encode(String),

    /// A capture was attempted after the session reached its slot capacity.
    #[error("session is full: layout holds at most {max} photos")]
    SessionFull {
        /// Slot capacity of the session's layout.
        max: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FotorekError {
    /// Build a [`FotorekError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FotorekError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FotorekError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Slot index of a load failure, if this error identifies one.
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::ImageLoad { slot, .. } | Self::ImageTimeout { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
