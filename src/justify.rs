//! Minimum-badness splitting of a batch into duration-bounded lines.
//!
//! This is paragraph line-breaking applied to a timeline: cues play the role of words, the gaps
//! between them the role of spaces, and `max_segment_length` the role of the line width. Each
//! line costs the cube of its unused space, so a few nearly empty lines lose to many moderately
//! full ones.

use tracing::{debug, trace};

use crate::interval::{Cue, gap};

/// Cost of a line spanning `span` seconds when lines may span up to `max_segment_length`.
///
/// Spans beyond the bound only occur for a lone oversized cue; their wasted space clamps to zero.
pub fn badness(max_segment_length: f64, span: f64) -> f64 {
    let slack = (max_segment_length - span).max(0.0);
    slack * slack * slack
}

/// Split `batch` into consecutive lines minimizing the summed [`badness`].
///
/// Every returned line spans at most `max_segment_length` seconds, except a single cue that is
/// already longer than that, which always stands alone. Lines borrow from `batch` and
/// concatenate back into it.
///
/// `max_segment_length <= 0` yields one line per cue. An empty batch yields no lines.
pub fn justify(batch: &[Cue], max_segment_length: f64) -> Vec<&[Cue]> {
    let n = batch.len();
    if n == 0 {
        return Vec::new();
    }

    // No line can hold anything, so skip the table entirely.
    if max_segment_length.is_nan() || max_segment_length <= 0.0 {
        return batch.chunks(1).collect();
    }

    let table = BadnessTable::build(batch, max_segment_length);

    // cost[i]: best total badness for batch[i..]; split[i]: end (exclusive) of the first line.
    let mut cost = vec![f64::INFINITY; n + 1];
    cost[n] = 0.0;
    let mut split: Vec<usize> = (1..=n).collect();

    // Suffixes first: cost[j + 1] is final by the time row i reads it.
    for i in (0..n).rev() {
        for j in i..n {
            // Feasible pairs form a prefix of the row.
            let Some(b) = table.get(i, j) else {
                break;
            };
            let candidate = b + cost[j + 1];
            // Strict: on ties the shorter first line wins.
            if candidate < cost[i] {
                cost[i] = candidate;
                split[i] = j + 1;
            }
        }
    }

    // Walk the first-line choices from the front.
    let mut lines = Vec::new();
    let mut i = 0;
    while i < n {
        let end = split[i];
        trace!(first = i, last = end - 1, "justified line");
        lines.push(&batch[i..end]);
        i = end;
    }

    debug!(
        cues = n,
        lines = lines.len(),
        total_badness = cost[0],
        "justified batch"
    );

    lines
}

/// Justify each batch independently and concatenate the lines in batch order.
pub fn justify_batches<'a>(batches: &[&'a [Cue]], max_segment_length: f64) -> Vec<&'a [Cue]> {
    batches
        .iter()
        .flat_map(|&batch| justify(batch, max_segment_length))
        .collect()
}

/// Badness of every feasible line `i..=j`, stored row-major in an `n * n` buffer.
///
/// Design:
/// - One flat allocation per batch; `None` marks an infeasible line.
/// - Rows stop at the first infeasible `j`, since spans only grow to the right.
struct BadnessTable {
    n: usize,
    cells: Vec<Option<f64>>,
}

impl BadnessTable {
    fn build(batch: &[Cue], max_segment_length: f64) -> Self {
        let n = batch.len();
        let mut cells = vec![None; n * n];

        for i in 0..n {
            let mut span = 0.0;
            for j in i..n {
                let spacing = if j > i {
                    gap(&batch[j - 1], &batch[j])
                } else {
                    0.0
                };
                span += batch[j].length() + spacing;

                // An oversized cue cannot be split further, so it is always a valid line.
                let feasible = span <= max_segment_length;
                if feasible || j == i {
                    cells[i * n + j] = Some(badness(max_segment_length, span));
                }
                if !feasible {
                    break;
                }
            }
        }

        Self { n, cells }
    }

    fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.n + j]
    }
}
