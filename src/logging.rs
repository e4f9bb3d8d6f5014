//! Subscriber setup for the binaries. The library itself only emits `tracing` events.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding `EnvFilter` directives, e.g. `SUBSKIP_LOG=subskip=debug`.
pub const LOG_ENV_VAR: &str = "SUBSKIP_LOG";

/// Filter from `SUBSKIP_LOG`, falling back to `error` when unset or unparsable.
fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(LevelFilter::ERROR.into())
        .from_env_lossy()
}

/// Initialize structured JSON logging on stderr.
///
/// Stdout carries the encoded ranges, so log lines must never land there. Returns `false` when a
/// global subscriber was already installed; calling this twice is harmless.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(true),
        )
        .try_init()
        .is_ok()
}
