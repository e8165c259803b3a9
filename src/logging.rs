//! Log subscriber setup for the binary
//!
//! Library code only emits `tracing` events. The CLI installs a single fmt
//! layer on stderr, so NDJSON on stdout stays machine readable.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Variable holding an `EnvFilter` directive (e.g. `dhow=debug`)
pub const LOG_ENV: &str = "DHOW_LOG";

/// Filter directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `DHOW_LOG` wins over the verbosity flag.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .compact()
        .with_target(verbose >= 2)
        .without_time()
        .with_writer(io::stderr)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
