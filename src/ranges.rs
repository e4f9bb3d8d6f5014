//! Expand dialogue segments into a gap-filling timeline and run-length compress it.

use tracing::debug;

use crate::interval::Range;
use crate::opts::Opts;
use crate::{Error, Result};

/// Fill the timeline `[0, total_duration)` around ordered, non-overlapping `dialogue` ranges.
///
/// For each dialogue range `(s, e)` this emits, in order:
/// - the silence from the cursor up to `s` (possibly zero-length)
/// - `(s, e)` without dialogue, if `opts.pad_before`
/// - `(s, e)` with dialogue
/// - `(s, e)` without dialogue, if `opts.pad_after`
///
/// followed by a final silence up to `total_duration`. The result always holds at least one
/// range and is meant to be passed through [`compress_ranges`].
pub fn build_ranges(dialogue: &[Range], total_duration: f64, opts: &Opts) -> Vec<Range> {
    let per_segment = 2 + usize::from(opts.pad_before) + usize::from(opts.pad_after);
    let mut out = Vec::with_capacity(dialogue.len() * per_segment + 1);
    let mut cursor = 0.0;

    for seg in dialogue {
        // Silence since the previous segment; zero-length when they touch.
        out.push(Range::silence(cursor, seg.start));
        if opts.pad_before {
            out.push(Range::silence(seg.start, seg.end));
        }
        out.push(Range::dialogue(seg.start, seg.end));
        if opts.pad_after {
            out.push(Range::silence(seg.start, seg.end));
        }
        cursor = seg.end;
    }

    // Tail up to the end of the media.
    out.push(Range::silence(cursor, total_duration));

    out
}

/// Merge each range into its predecessor when they touch exactly and share a label.
///
/// Boundaries are compared with exact equality; no other deduplication happens.
///
/// Errors:
/// - `Error::EmptyRanges` when `ranges` is empty
pub fn compress_ranges(ranges: &[Range]) -> Result<Vec<Range>> {
    let Some((first, rest)) = ranges.split_first() else {
        return Err(Error::EmptyRanges);
    };

    let mut out = Vec::new();
    let mut prev = *first;

    for item in rest {
        // Pads overlap the dialogue they copy, so only an exact touch counts.
        if prev.end == item.start && prev.has_subtitle == item.has_subtitle {
            prev.end = item.end;
        } else {
            out.push(prev);
            prev = *item;
        }
    }
    out.push(prev);

    debug!(
        before = ranges.len(),
        after = out.len(),
        "compressed ranges"
    );

    Ok(out)
}

/// [`build_ranges`] followed by [`compress_ranges`].
pub fn prepare_ranges(dialogue: &[Range], total_duration: f64, opts: &Opts) -> Result<Vec<Range>> {
    let built = build_ranges(dialogue, total_duration, opts);
    compress_ranges(&built)
}
