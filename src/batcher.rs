//! Group cues into batches of nearby dialogue.

use tracing::debug;

use crate::interval::{Cue, ensure_sorted, gap};
use crate::{Error, Result};

/// Split sorted `cues` into maximal runs whose consecutive gaps are all `< gap_threshold`.
///
/// Batches borrow from `cues` and together form a partition of it, in input order.
///
/// Errors:
/// - `Error::EmptyCues` when `cues` is empty
/// - `Error::UnsortedCues` when `cues` is not sorted by start time
pub fn split_into_batches(cues: &[Cue], gap_threshold: f64) -> Result<Vec<&[Cue]>> {
    if cues.is_empty() {
        return Err(Error::EmptyCues);
    }
    ensure_sorted(cues)?;

    let mut batches = Vec::new();
    let mut batch_start = 0usize;

    for i in 1..cues.len() {
        if gap(&cues[i - 1], &cues[i]) >= gap_threshold {
            batches.push(&cues[batch_start..i]);
            batch_start = i;
        }
    }
    batches.push(&cues[batch_start..]);

    debug!(
        cues = cues.len(),
        batches = batches.len(),
        gap_threshold,
        "split cues into batches"
    );

    Ok(batches)
}
