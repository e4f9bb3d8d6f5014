//! Time-span value types shared by every stage.
//!
//! All times are `f64` seconds from the start of the media. Lengths and gaps are clamped at zero,
//! so overlapping or zero-length intervals never produce negative arithmetic downstream.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single timestamped dialogue interval.
///
/// Only the timing matters to this crate; subtitle text stays with whoever parsed the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
}

impl Cue {
    /// Create a cue, rejecting inverted, negative, or non-finite timings.
    ///
    /// `-0.0` is stored as `0.0`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        check_bounds(start, end)?;
        Ok(Self {
            start: positive_zero(start),
            end: positive_zero(end),
        })
    }

    /// Duration of the cue itself, never negative.
    pub fn length(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Order two cues by start time.
    ///
    /// Numeric comparison, so `-0.0` and `0.0` are equal. Falls back to `total_cmp` only for NaN,
    /// which validated cues never carry.
    pub fn cmp_by_start(&self, other: &Cue) -> Ordering {
        self.start
            .partial_cmp(&other.start)
            .unwrap_or_else(|| self.start.total_cmp(&other.start))
    }
}

/// A labeled playback segment of the final timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    pub has_subtitle: bool,
}

impl Range {
    pub fn new(start: f64, end: f64, has_subtitle: bool) -> Result<Self> {
        check_bounds(start, end)?;
        Ok(Self {
            start: positive_zero(start),
            end: positive_zero(end),
            has_subtitle,
        })
    }

    /// A range carrying dialogue.
    ///
    /// Unchecked: callers derive the bounds from already-validated cues.
    pub fn dialogue(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            has_subtitle: true,
        }
    }

    /// A range without dialogue.
    ///
    /// Unchecked, and may be zero-length when two dialogue ranges touch.
    pub fn silence(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            has_subtitle: false,
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Silence between two ordered intervals; zero when they touch or overlap.
pub fn gap(prev: &Cue, next: &Cue) -> f64 {
    (next.start - prev.end).max(0.0)
}

/// Distance from the start of `first` to the end of `last`; zero if `last` ends first.
pub fn span_length(first: &Cue, last: &Cue) -> f64 {
    (last.end - first.start).max(0.0)
}

/// Verify `cues` is sorted by start time.
///
/// Returns `Error::UnsortedCues` naming the first cue that starts before its predecessor.
pub fn ensure_sorted(cues: &[Cue]) -> Result<()> {
    for (i, pair) in cues.windows(2).enumerate() {
        if pair[0].cmp_by_start(&pair[1]) == Ordering::Greater {
            return Err(Error::UnsortedCues { index: i + 1 });
        }
    }
    Ok(())
}

fn positive_zero(t: f64) -> f64 {
    if t == 0.0 { 0.0 } else { t }
}

fn check_bounds(start: f64, end: f64) -> Result<()> {
    let valid = start.is_finite() && end.is_finite() && start >= 0.0 && start <= end;
    if !valid {
        return Err(Error::InvalidInterval { start, end });
    }
    Ok(())
}
