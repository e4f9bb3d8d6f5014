use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use subskip::json_array_encoder::JsonArrayEncoder;
use subskip::opts::{DEFAULT_GAP_THRESHOLD, DEFAULT_MAX_SEGMENT_LENGTH};
use subskip::xspf_encoder::{PlaylistSource, XspfEncoder};
use subskip::{Opts, OutputType, Planner};

mod cues;

#[derive(Parser, Debug)]
#[command(name = "subskip")]
#[command(about = "Split a media timeline into dialogue and non-dialogue ranges")]
struct Params {
    /// Subtitle cues to plan from (`.srt`, or `.json` array of `{start, end}`).
    #[arg(short = 's', long = "subtitles")]
    subtitles_path: PathBuf,

    /// Total media duration in seconds.
    #[arg(short = 'd', long = "duration")]
    duration: f64,

    /// Gap (seconds) at or above which cues are batched separately.
    #[arg(long = "gap-threshold", default_value_t = DEFAULT_GAP_THRESHOLD)]
    gap_threshold: f64,

    /// Maximum span (seconds) of one dialogue segment.
    #[arg(long = "max-segment-length", default_value_t = DEFAULT_MAX_SEGMENT_LENGTH)]
    max_segment_length: f64,

    /// Do not emit a non-dialogue copy before each dialogue range.
    #[arg(long = "no-pad-before", default_value_t = false)]
    no_pad_before: bool,

    /// Do not emit a non-dialogue copy after each dialogue range.
    #[arg(long = "no-pad-after", default_value_t = false)]
    no_pad_after: bool,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Json
    )]
    output_type: OutputType,

    /// Source video referenced by every playlist track (required for `xspf`).
    #[arg(long = "video")]
    video_path: Option<PathBuf>,

    /// Subtitle file attached to dialogue tracks (defaults to `--subtitles`).
    #[arg(long = "subtitle-file")]
    subtitle_file: Option<PathBuf>,
}

impl Params {
    fn opts(&self) -> Opts {
        Opts {
            gap_threshold: self.gap_threshold,
            max_segment_length: self.max_segment_length,
            pad_before: !self.no_pad_before,
            pad_after: !self.no_pad_after,
        }
    }
}

fn main() -> Result<()> {
    subskip::logging::init();
    let params = Params::parse();

    let planner = Planner::new(params.opts())?;
    let cues = cues::read_cues(&params.subtitles_path)?;
    info!(
        cues = cues.len(),
        suffix = %planner.opts().file_suffix(),
        "loaded subtitles"
    );

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    match params.output_type {
        OutputType::Json => {
            let mut encoder = JsonArrayEncoder::new(writer);
            planner.plan_to_writer(&cues, params.duration, &mut encoder)?;
        }
        OutputType::Xspf => {
            let video = params
                .video_path
                .as_deref()
                .ok_or_else(|| anyhow!("--video is required for xspf output"))?;
            let video_path = std::fs::canonicalize(video)
                .with_context(|| format!("failed resolving video path: {}", video.display()))?;
            let subtitle_path = params
                .subtitle_file
                .clone()
                .unwrap_or_else(|| params.subtitles_path.clone());

            let source = PlaylistSource {
                video_path,
                subtitle_path: Some(subtitle_path),
                duration: params.duration,
            };
            let mut encoder = XspfEncoder::new(writer, source);
            planner.plan_to_writer(&cues, params.duration, &mut encoder)?;
        }
    }

    Ok(())
}
