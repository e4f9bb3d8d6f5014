use crate::{Error, Result};

/// Default gap (seconds) at or above which two cues land in different batches.
pub const DEFAULT_GAP_THRESHOLD: f64 = 5.0;

/// Default upper bound (seconds) on the span of one justified dialogue segment.
pub const DEFAULT_MAX_SEGMENT_LENGTH: f64 = 30.0;

/// Options that control how cues are turned into timeline ranges.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opts {
    /// A gap between consecutive cues of at least this many seconds starts a new batch.
    ///
    /// Values `<= 0` put every cue in its own batch.
    pub gap_threshold: f64,

    /// Maximum span of one dialogue segment, in seconds.
    ///
    /// A single cue longer than this still forms its own segment. Values `<= 0` make every cue
    /// its own segment.
    pub max_segment_length: f64,

    /// Emit a non-dialogue copy of each dialogue range right before it.
    pub pad_before: bool,

    /// Emit a non-dialogue copy of each dialogue range right after it.
    pub pad_after: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
            pad_before: true,
            pad_after: true,
        }
    }
}

impl Opts {
    /// Reject NaN or infinite thresholds.
    ///
    /// Zero and negative values are accepted; they have well-defined degenerate behavior.
    pub fn validate(&self) -> Result<()> {
        if !self.gap_threshold.is_finite() {
            return Err(Error::InvalidOpts(format!(
                "gap_threshold must be finite, got {}",
                self.gap_threshold
            )));
        }
        if !self.max_segment_length.is_finite() {
            return Err(Error::InvalidOpts(format!(
                "max_segment_length must be finite, got {}",
                self.max_segment_length
            )));
        }
        Ok(())
    }

    /// File-name suffix describing the padding layout, e.g. `".ata"` when both pads are on.
    ///
    /// `t` stands for the dialogue range, each `a` for a padding copy around it.
    pub fn file_suffix(&self) -> String {
        let before = if self.pad_before { "a" } else { "" };
        let after = if self.pad_after { "a" } else { "" };
        format!(".{before}t{after}")
    }
}
