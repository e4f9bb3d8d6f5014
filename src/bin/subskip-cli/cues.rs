use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use subskip::Cue;

/// Read cues from an `.srt` or `.json` file, chosen by extension.
///
/// SRT input only contributes each block's timing line; JSON input is an array of
/// `{"start": seconds, "end": seconds}` objects.
pub fn read_cues(path: &Path) -> Result<Vec<Cue>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading subtitles: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let cues = match ext.as_deref() {
        Some("srt") => parse_srt_cues(&raw),
        Some("json") => parse_json_cues(&raw),
        _ => bail!("unsupported subtitle file (expected .srt or .json): {}", path.display()),
    }
    .with_context(|| format!("failed parsing subtitles: {}", path.display()))?;

    Ok(cues)
}

pub fn parse_json_cues(raw: &str) -> Result<Vec<Cue>> {
    let cues: Vec<Cue> = serde_json::from_str(raw)?;
    cues.into_iter()
        .map(|c| Cue::new(c.start, c.end).map_err(Into::into))
        .collect()
}

/// Parse SRT block by block: an optional numeric index line, one timing line, then text up to
/// the next blank line. Text lines are never read as timings, even when they contain `-->`.
pub fn parse_srt_cues(raw: &str) -> Result<Vec<Cue>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut cues = Vec::new();
    let mut lines = raw.lines().enumerate().peekable();

    while let Some((line_no, line)) = lines.next() {
        let head = line.trim();
        if head.is_empty() {
            continue;
        }

        // Some writers omit the index, so a block may open with its timing line.
        let (timing_no, timing) = if head.parse::<usize>().is_ok() {
            lines
                .next()
                .map(|(n, l)| (n, l.trim()))
                .with_context(|| format!("line {}: cue is missing its timing line", line_no + 1))?
        } else if head.contains("-->") {
            (line_no, head)
        } else {
            bail!("line {}: expected a cue index or timing line, got '{head}'", line_no + 1);
        };

        let (start, end) =
            parse_time_range_arrow(timing).with_context(|| format!("line {}", timing_no + 1))?;
        cues.push(Cue::new(start, end)?);

        // Skip the cue text.
        while lines.next_if(|(_, l)| !l.trim().is_empty()).is_some() {}
    }

    Ok(cues)
}

fn parse_time_range_arrow(line: &str) -> Result<(f64, f64)> {
    let (a, b) = line
        .split_once("-->")
        .ok_or_else(|| anyhow!("missing '-->' in time range: '{line}'"))?;

    // WebVTT-style cue settings may follow the end timestamp.
    let b = b.split_whitespace().next().unwrap_or_default();
    Ok((parse_timestamp(a)?, parse_timestamp(b)?))
}

/// Parse `HH:MM:SS,mmm` (or `.mmm`) into seconds.
fn parse_timestamp(s: &str) -> Result<f64> {
    let t = s.trim();
    let (hms, frac) = match t.split_once([',', '.']) {
        Some((a, b)) => (a, Some(b)),
        None => (t, None),
    };

    let parts: Vec<&str> = hms.split(':').collect();
    let [h, m, sec] = parts.as_slice() else {
        bail!("unrecognized timestamp: '{t}'");
    };
    let h: u64 = h.parse().map_err(|_| anyhow!("bad hours: '{t}'"))?;
    let m: u64 = m.parse().map_err(|_| anyhow!("bad minutes: '{t}'"))?;
    let sec: u64 = sec.parse().map_err(|_| anyhow!("bad seconds: '{t}'"))?;

    let out_of_range = || anyhow!("timestamp out of range: '{t}'");
    let mut millis = h
        .checked_mul(60)
        .and_then(|v| v.checked_add(m))
        .and_then(|v| v.checked_mul(60))
        .and_then(|v| v.checked_add(sec))
        .and_then(|v| v.checked_mul(1000))
        .ok_or_else(out_of_range)?;
    if let Some(frac) = frac {
        let mut digits: String = frac.trim().chars().take(3).collect();
        while digits.len() < 3 {
            digits.push('0');
        }
        let ms: u64 = digits
            .parse()
            .map_err(|_| anyhow!("bad milliseconds: '{t}'"))?;
        millis = millis.checked_add(ms).ok_or_else(out_of_range)?;
    }

    Ok(millis as f64 / 1000.0)
}
