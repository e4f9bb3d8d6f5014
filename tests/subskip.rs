use subskip::batcher::split_into_batches;
use subskip::interval::gap;
use subskip::justify::{badness, justify};
use subskip::planner::dialogue_ranges;
use subskip::ranges::{build_ranges, compress_ranges};
use subskip::{Cue, Error, Opts, Planner, Range};

fn cues(pairs: &[(f64, f64)]) -> Vec<Cue> {
    pairs
        .iter()
        .map(|&(start, end)| Cue { start, end })
        .collect()
}

fn unpadded(gap_threshold: f64, max_segment_length: f64) -> Opts {
    Opts {
        gap_threshold,
        max_segment_length,
        pad_before: false,
        pad_after: false,
    }
}

/// Span of a line, accumulated left to right the same way the justifier does.
fn line_span(line: &[Cue]) -> f64 {
    let mut span = 0.0;
    for (k, cue) in line.iter().enumerate() {
        let spacing = if k > 0 { gap(&line[k - 1], cue) } else { 0.0 };
        span += cue.length() + spacing;
    }
    span
}

fn total_badness(lines: &[&[Cue]], max: f64) -> f64 {
    lines.iter().map(|line| badness(max, line_span(line))).sum()
}

/// Minimum total badness over every feasible split, by enumerating all cut positions.
fn brute_force_min(batch: &[Cue], max: f64) -> f64 {
    let n = batch.len();
    let mut best = f64::INFINITY;

    for mask in 0u32..(1 << (n - 1)) {
        let mut lines: Vec<&[Cue]> = Vec::new();
        let mut start = 0;
        for cut in 0..n - 1 {
            if mask & (1 << cut) != 0 {
                lines.push(&batch[start..=cut]);
                start = cut + 1;
            }
        }
        lines.push(&batch[start..]);

        let feasible = lines
            .iter()
            .all(|line| line.len() == 1 || line_span(line) <= max);
        if feasible {
            best = best.min(total_badness(&lines, max));
        }
    }

    best
}

/// Small deterministic generator so the property checks don't need extra dependencies.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn cues(&mut self, n: usize, max_len: f64, max_gap: f64) -> Vec<Cue> {
        let mut t = 0.0;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let start = t + self.next_unit() * max_gap;
            let end = start + self.next_unit() * max_len;
            out.push(Cue { start, end });
            t = end;
        }
        out
    }
}

fn assert_covers(ranges: &[Range], total_duration: f64) {
    assert_eq!(ranges[0].start, 0.0);
    assert_eq!(ranges[ranges.len() - 1].end, total_duration);
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end, pair[1].start, "gap or overlap in {ranges:?}");
        assert_ne!(
            pair[0].has_subtitle, pair[1].has_subtitle,
            "adjacent ranges share a label in {ranges:?}"
        );
    }
}

#[test]
fn close_cues_become_one_dialogue_segment() -> anyhow::Result<()> {
    let input = cues(&[(0.0, 1.0), (2.0, 3.0)]);
    let batches = split_into_batches(&input, 5.0)?;
    assert_eq!(batches.len(), 1);

    let lines = justify(batches[0], 30.0);
    assert_eq!(lines.len(), 1);
    assert_eq!(
        dialogue_ranges(&input, &Opts::default())?,
        vec![Range::dialogue(0.0, 3.0)]
    );
    Ok(())
}

#[test]
fn distant_cues_become_separate_segments() -> anyhow::Result<()> {
    let input = cues(&[(0.0, 1.0), (10.0, 11.0)]);
    assert_eq!(split_into_batches(&input, 5.0)?.len(), 2);
    assert_eq!(
        dialogue_ranges(&input, &Opts::default())?,
        vec![Range::dialogue(0.0, 1.0), Range::dialogue(10.0, 11.0)]
    );
    Ok(())
}

#[test]
fn padded_segment_builds_flanking_copies_then_merges_with_silence() -> anyhow::Result<()> {
    let opts = Opts::default();
    let built = build_ranges(&[Range::dialogue(10.0, 12.0)], 20.0, &opts);
    assert_eq!(
        built,
        vec![
            Range::silence(0.0, 10.0),
            Range::silence(10.0, 12.0),
            Range::dialogue(10.0, 12.0),
            Range::silence(10.0, 12.0),
            Range::silence(12.0, 20.0),
        ]
    );

    // The leading pad touches the silence before it; the trailing pad touches the one after.
    let compressed = compress_ranges(&built)?;
    assert_eq!(
        compressed,
        vec![
            Range::silence(0.0, 12.0),
            Range::dialogue(10.0, 12.0),
            Range::silence(10.0, 20.0),
        ]
    );
    Ok(())
}

#[test]
fn oversized_cue_is_never_split() -> anyhow::Result<()> {
    let input = cues(&[(0.0, 100.0)]);
    let lines = justify(&input, 30.0);
    assert_eq!(lines, vec![&input[..]]);

    let planner = Planner::new(unpadded(5.0, 30.0))?;
    let ranges = planner.plan(&input, 120.0)?;
    assert_eq!(
        ranges,
        vec![
            Range::silence(0.0, 0.0),
            Range::dialogue(0.0, 100.0),
            Range::silence(100.0, 120.0),
        ]
    );
    Ok(())
}

#[test]
fn batches_partition_the_input() -> anyhow::Result<()> {
    let mut rng = Lcg(7);
    for threshold in [0.0, 0.5, 2.0, 5.0] {
        let input = rng.cues(40, 3.0, 6.0);
        let batches = split_into_batches(&input, threshold)?;
        let rebuilt: Vec<Cue> = batches.concat();
        assert_eq!(rebuilt, input);
        assert!(batches.iter().all(|b| !b.is_empty()));
    }
    Ok(())
}

#[test]
fn justified_lines_are_feasible_and_partition_the_batch() {
    let mut rng = Lcg(11);
    for max in [0.0, 2.0, 7.5, 30.0] {
        let batch = rng.cues(25, 4.0, 1.5);
        let lines = justify(&batch, max);
        assert_eq!(lines.concat(), batch);
        for line in &lines {
            assert!(line.len() == 1 || line_span(line) <= max, "infeasible line {line:?}");
        }
    }
}

#[test]
fn justify_matches_brute_force_minimum() {
    let mut rng = Lcg(42);
    for round in 0..30 {
        let n = 1 + round % 10;
        let batch = rng.cues(n, 5.0, 2.0);
        let max = 4.0 + rng.next_unit() * 10.0;

        let lines = justify(&batch, max);
        let got = total_badness(&lines, max);
        let want = brute_force_min(&batch, max);
        assert!(
            (got - want).abs() <= 1e-9 * want.max(1.0),
            "round {round}: dp={got} brute={want}"
        );
    }
}

#[test]
fn unpadded_plans_cover_the_timeline() -> anyhow::Result<()> {
    let mut rng = Lcg(3);
    for max in [5.0, 30.0] {
        let input = rng.cues(60, 3.0, 8.0);
        let total = input[input.len() - 1].end + 10.0;
        let planner = Planner::new(unpadded(5.0, max))?;
        let ranges = planner.plan(&input, total)?;
        assert_covers(&ranges, total);
    }
    Ok(())
}

#[test]
fn plan_surfaces_contract_violations() -> anyhow::Result<()> {
    let planner = Planner::new(Opts::default())?;
    assert!(matches!(planner.plan(&[], 10.0), Err(Error::EmptyCues)));

    let unsorted = cues(&[(5.0, 6.0), (1.0, 2.0)]);
    assert!(matches!(
        planner.plan(&unsorted, 10.0),
        Err(Error::UnsortedCues { index: 1 })
    ));
    Ok(())
}

#[test]
fn overlapping_lines_never_reach_the_range_builder() -> anyhow::Result<()> {
    let planner = Planner::new(unpadded(5.0, 5.0))?;
    let input = cues(&[(0.0, 10.0), (2.0, 3.0)]);

    let dialogue = dialogue_ranges(&input, planner.opts())?;
    assert_eq!(
        dialogue,
        vec![Range::dialogue(0.0, 10.0), Range::dialogue(2.0, 3.0)]
    );
    assert!(matches!(
        planner.plan(&input, 20.0),
        Err(Error::OverlappingDialogue { index: 1 })
    ));
    Ok(())
}
