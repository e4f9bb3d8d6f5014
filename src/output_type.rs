/// The supported output formats for the final timeline ranges.
///
/// Each variant maps to a concrete `RangeEncoder` implementation. With the `cli` feature the
/// enum doubles as a `clap` flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output ranges as a JSON array.
    Json,

    /// Output ranges as an XSPF playlist replaying each range from the source video.
    Xspf,
}
