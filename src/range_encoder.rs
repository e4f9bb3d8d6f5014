use crate::Result;
use crate::interval::Range;

/// Streaming sink for the final timeline ranges.
///
/// Implementations write each range as it arrives and finish the document on `close`.
/// `close` is idempotent; writing after `close` is an error.
pub trait RangeEncoder {
    fn write_range(&mut self, range: &Range) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
