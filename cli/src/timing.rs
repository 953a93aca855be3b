//! Tracing setup. `#[instrument]`ed flows report their duration when
//! `--timing` is on.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn default_level(verbose: bool, timing: bool) -> LevelFilter {
    match (verbose, timing) {
        (true, _) => LevelFilter::DEBUG,
        // Span close events are logged at INFO.
        (false, true) => LevelFilter::INFO,
        (false, false) => LevelFilter::WARN,
    }
}

/// `RUST_LOG` overrides the level picked from the flags.
pub fn init_tracing(verbose: bool, timing: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, timing).into())
        .from_env_lossy();

    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
