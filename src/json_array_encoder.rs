use std::io::Write;

use crate::Result;
use crate::interval::Range;
use crate::range_encoder::RangeEncoder;

/// A `RangeEncoder` that writes ranges as a single JSON array.
///
/// Design:
/// - Ranges go straight to the writer as they are produced; the planned timeline is never
///   rendered into an intermediate string.
/// - The encoder tracks just enough state (opened, first element, closed) to keep the array
///   well-formed no matter where the caller stops.
///
/// Example output:
/// ```json
/// [{"start":0.0,"end":10.0,"has_subtitle":false},{"start":10.0,"end":12.0,"has_subtitle":true}]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// Destination for the JSON text.
    w: W,

    /// Whether the opening `[` has been written.
    started: bool,

    /// Whether the next element is the first one, i.e. needs no leading comma.
    first: bool,

    /// Set by `close`; later writes fail.
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Wrap `w`. Nothing is written until the first range or `close`.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the opening `[` once.
    ///
    /// Deferred so that:
    /// - an encoder closed without ranges still emits `[]`
    /// - a writer that never receives a range sees no output until close
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> RangeEncoder for JsonArrayEncoder<W> {
    /// Append one range as the next array element.
    fn write_range(&mut self, range: &Range) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write range: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        // Comma before every element but the first.
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, range)?;

        // Pipes and stdout should see each range as soon as it is planned.
        self.w.flush()?;
        Ok(())
    }

    /// Terminate the array and flush. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // An untouched encoder still has to produce `[]`.
        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
