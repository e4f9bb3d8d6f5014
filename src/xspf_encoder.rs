use std::io::Write;
use std::path::PathBuf;

use crate::Result;
use crate::interval::Range;
use crate::range_encoder::RangeEncoder;

const VLC_EXTENSION_APP: &str = "http://www.videolan.org/vlc/playlist/0";
const FILE_CACHING_MS: &str = "300";

/// Media the playlist tracks point into.
#[derive(Debug, Clone)]
pub struct PlaylistSource {
    /// Video every track plays a slice of; written as a `file://` location.
    pub video_path: PathBuf,

    /// Subtitle file attached to dialogue tracks. Dialogue tracks get no `sub-file` when `None`.
    pub subtitle_path: Option<PathBuf>,

    /// Total media duration in seconds.
    pub duration: f64,
}

/// A `RangeEncoder` that writes a VLC-flavoured XSPF playlist, one track per range.
///
/// Each track replays `[start, end)` of the same video via VLC's `start-time` / `stop-time`
/// options; dialogue tracks also load the subtitle file. The playlist-level extension listing
/// every track id is written on `close`, so the encoder only keeps a counter.
pub struct XspfEncoder<W: Write> {
    w: W,
    source: PlaylistSource,
    started: bool,
    closed: bool,
    tracks: usize,
}

impl<W: Write> XspfEncoder<W> {
    pub fn new(w: W, source: PlaylistSource) -> Self {
        Self {
            w,
            source,
            started: false,
            closed: false,
            tracks: 0,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        writeln!(self.w, "<?xml version='1.0' encoding='utf-8'?>")?;
        writeln!(
            self.w,
            r#"<playlist xmlns="http://xspf.org/ns/0/" xmlns:vlc="http://www.videolan.org/vlc/playlist/ns/0/" version="1">"#
        )?;
        writeln!(self.w, "  <title>Playlist</title>")?;
        writeln!(self.w, "  <trackList>")?;
        self.started = true;
        Ok(())
    }
}

impl<W: Write> RangeEncoder for XspfEncoder<W> {
    fn write_range(&mut self, range: &Range) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write range: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        let id = self.tracks;
        let location = escape(&format!("file://{}", self.source.video_path.display()));
        let kind = if range.has_subtitle { "T" } else { "A" };

        writeln!(self.w, "    <track>")?;
        writeln!(self.w, "      <location>{location}</location>")?;
        writeln!(
            self.w,
            "      <duration>{}</duration>",
            self.source.duration.trunc() as u64
        )?;
        writeln!(
            self.w,
            "      <annotation>{kind} {}-{}</annotation>",
            humanize(range.start),
            humanize(range.end)
        )?;
        writeln!(self.w, r#"      <extension application="{VLC_EXTENSION_APP}">"#)?;
        writeln!(self.w, "        <vlc:id>{id}</vlc:id>")?;
        write_option(&mut self.w, "file-caching", FILE_CACHING_MS)?;
        write_option(&mut self.w, "start-time", &format!("{:.3}", range.start))?;
        write_option(&mut self.w, "stop-time", &format!("{:.3}", range.end))?;
        if range.has_subtitle {
            if let Some(sub) = &self.source.subtitle_path {
                write_option(&mut self.w, "sub-file", &sub.display().to_string())?;
            }
        }
        writeln!(self.w, "      </extension>")?;
        writeln!(self.w, "    </track>")?;

        self.tracks += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;

        writeln!(self.w, "  </trackList>")?;
        writeln!(self.w, r#"  <extension application="{VLC_EXTENSION_APP}">"#)?;
        for tid in 0..self.tracks {
            writeln!(self.w, r#"    <vlc:item tid="{tid}"/>"#)?;
        }
        writeln!(self.w, "  </extension>")?;
        writeln!(self.w, "</playlist>")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}

fn write_option<W: Write>(w: &mut W, key: &str, value: &str) -> Result<()> {
    writeln!(w, "        <vlc:option>{key}={}</vlc:option>", escape(value))?;
    Ok(())
}

/// Whole seconds as `HH:MM:SS`; fractions are truncated.
fn humanize(seconds: f64) -> String {
    let total = seconds.max(0.0).trunc() as u64;
    let s = total % 60;
    let m = (total / 60) % 60;
    let h = total / 3600;
    format!("{h:02}:{m:02}:{s:02}")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
