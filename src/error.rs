use std::error::Error as StdError;

use thiserror::Error;

/// Subskip's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Subskip's crate-wide error type.
///
/// Every variant except `Message` and `Other` is an input-contract violation. Planning is pure
/// and deterministic, so these go straight back to the caller; retrying cannot change them.
///
/// Library code returns this type rather than `anyhow::Error`; binaries and tests convert freely
/// in both directions.
#[derive(Debug, Error)]
pub enum Error {
    /// Batching was handed no cues; there is nothing to anchor a timeline on.
    #[error("cue list is empty")]
    EmptyCues,

    /// `compress_ranges` was handed an empty slice.
    #[error("range list is empty")]
    EmptyRanges,

    /// `index` is the first cue that starts before the cue preceding it.
    #[error("cues are not sorted by start time: cue {index} starts before its predecessor")]
    UnsortedCues { index: usize },

    /// Overlapping cues produced a justified line that starts inside the previous one.
    #[error("dialogue range {index} starts before the previous one ends")]
    OverlappingDialogue { index: usize },

    /// Non-finite, negative, or inverted bounds passed to a checked constructor.
    #[error("invalid interval: start={start}, end={end}")]
    InvalidInterval { start: f64, end: f64 },

    /// `Opts` carries a NaN or infinite threshold.
    #[error("invalid options: {0}")]
    InvalidOpts(String),

    /// Media duration is negative, non-finite, or ends before the dialogue does.
    #[error("invalid total duration: {0}")]
    InvalidDuration(f64),

    /// Free-form failure, including flattened `anyhow` chains from callers.
    #[error("{0}")]
    Message(String),

    /// I/O and serialization failures from encoders.
    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

// Keep the whole context chain; `{:#}` joins it with `: `.
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}
