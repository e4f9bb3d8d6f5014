//! `subskip` — partition a media timeline into dialogue and non-dialogue ranges.
//!
//! This crate provides:
//! - Cue batching by inter-cue gap
//! - Minimum-badness justification of batches into duration-bounded segments
//! - Gap-filling range expansion (with optional padding copies) and run-length compression
//! - Pluggable output encoders (JSON, XSPF playlist)
//!
//! The core is pure: it receives already-parsed cues and a media duration, and performs no file
//! I/O. Probing media, extracting subtitles, and cutting video are left to the caller.

mod error;

pub use error::{Error, Result};

// High-level API (most consumers should start here).
pub mod opts;
pub mod planner;

// Interval value types.
pub mod interval;

// Pipeline stages.
pub mod batcher;
pub mod justify;
pub mod ranges;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod range_encoder;

// Output encoders that serialize ranges into various formats.
pub mod json_array_encoder;
pub mod xspf_encoder;

// Logging configuration for binaries.
#[cfg(feature = "logging")]
pub mod logging;

pub use interval::{Cue, Range};
pub use opts::Opts;
pub use output_type::OutputType;
pub use planner::Planner;
pub use range_encoder::RangeEncoder;
