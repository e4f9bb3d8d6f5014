//! High-level API for turning cues into a labeled timeline.
//!
//! `Planner` wires the stages together: batch cues by gap, justify each batch into bounded
//! lines, derive one dialogue range per line, then fill and compress the timeline. Each stage
//! stays callable on its own from its module.

use tracing::{debug, warn};

use crate::batcher::split_into_batches;
use crate::interval::{Cue, Range};
use crate::justify::justify_batches;
use crate::opts::Opts;
use crate::range_encoder::RangeEncoder;
use crate::ranges::prepare_ranges;
use crate::{Error, Result};

/// One dialogue range per justified line, spanning its first cue's start to its last cue's end.
///
/// Errors:
/// - `Error::EmptyCues` / `Error::UnsortedCues` from batching
pub fn dialogue_ranges(cues: &[Cue], opts: &Opts) -> Result<Vec<Range>> {
    let batches = split_into_batches(cues, opts.gap_threshold)?;
    let lines = justify_batches(&batches, opts.max_segment_length);

    debug!(
        batches = batches.len(),
        lines = lines.len(),
        "derived dialogue ranges"
    );

    // Lines are never empty.
    Ok(lines
        .iter()
        .map(|line| Range::dialogue(line[0].start, line[line.len() - 1].end))
        .collect())
}

/// The main entry point: validated options plus the full cue-to-timeline pipeline.
///
/// Typical usage:
/// - Construct once with the desired `Opts`.
/// - Call `plan` (or `plan_to_writer`) for each cue list.
#[derive(Debug, Clone)]
pub struct Planner {
    opts: Opts,
}

impl Planner {
    /// Fails fast with `Error::InvalidOpts` on NaN or infinite thresholds.
    pub fn new(opts: Opts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn dialogue_ranges(&self, cues: &[Cue]) -> Result<Vec<Range>> {
        dialogue_ranges(cues, &self.opts)
    }

    /// Partition `[0, total_duration)` into compressed dialogue / non-dialogue ranges.
    ///
    /// Errors:
    /// - `Error::InvalidDuration` when `total_duration` is negative, non-finite, or ends before
    ///   the furthest dialogue end
    /// - `Error::EmptyCues` / `Error::UnsortedCues` for bad cue input
    /// - `Error::OverlappingDialogue` when overlapping cues yield a line that starts before the
    ///   previous line ends (the gap fill would otherwise emit an inverted silence)
    pub fn plan(&self, cues: &[Cue], total_duration: f64) -> Result<Vec<Range>> {
        if !total_duration.is_finite() || total_duration < 0.0 {
            return Err(Error::InvalidDuration(total_duration));
        }

        // Batch, justify, one range per line.
        let dialogue = self.dialogue_ranges(cues)?;

        // The builder's cursor walk assumes ordered, non-overlapping segments.
        ensure_monotone(&dialogue)?;

        // Compare against the furthest end, not the last one.
        let furthest_end = dialogue.iter().map(|r| r.end).fold(0.0, f64::max);
        if furthest_end > total_duration {
            return Err(Error::InvalidDuration(total_duration));
        }

        // Fill the gaps, then merge touching same-label neighbours.
        let ranges = prepare_ranges(&dialogue, total_duration, &self.opts)?;
        debug!(
            cues = cues.len(),
            dialogue = dialogue.len(),
            ranges = ranges.len(),
            total_duration,
            "planned timeline"
        );
        Ok(ranges)
    }

    /// Run [`Planner::plan`] and stream the result into `encoder`, then close it.
    ///
    /// The encoder is closed even when planning fails, so partial documents stay well-formed; the
    /// planning error wins over a close error.
    pub fn plan_to_writer<E>(&self, cues: &[Cue], total_duration: f64, encoder: &mut E) -> Result<()>
    where
        E: RangeEncoder + ?Sized,
    {
        let run_res = self
            .plan(cues, total_duration)
            .and_then(|ranges| ranges.iter().try_for_each(|r| encoder.write_range(r)));
        merge_run_and_close(run_res, encoder.close())
    }
}

/// Each dialogue range must start at or after the previous one's end.
///
/// Sorted cues do not guarantee this: an oversized cue justified onto its own line can still
/// overlap the cue after it, e.g. `(0, 10)` followed by `(2, 3)`.
fn ensure_monotone(dialogue: &[Range]) -> Result<()> {
    for (i, pair) in dialogue.windows(2).enumerate() {
        if pair[1].start < pair[0].end {
            return Err(Error::OverlappingDialogue { index: i + 1 });
        }
    }
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "failed to close encoder after planning error");
            Err(err)
        }
    }
}
