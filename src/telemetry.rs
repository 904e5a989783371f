//! Tracing setup for binaries and tests
//!
//! Installs a `tracing_subscriber` fmt layer filtered by `RUST_LOG` and opens
//! a root span identifying the service, so every event emitted by the client
//! is attributed to it.

use tracing::span::EnteredSpan;
use tracing::{debug, info_span, Level};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber and enter a root span for `service_name`
///
/// `verbose` raises the default level from INFO to DEBUG; `RUST_LOG`
/// directives still apply on top. Events go to stderr so stdout stays free
/// for command output. Calling this more than once keeps the first
/// subscriber.
pub fn init_tracing(service_name: &str, verbose: bool) -> EnteredSpan {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        debug!("Global subscriber already installed");
    }

    info_span!(
        "service",
        service.name = %service_name,
        service.version = crate::VERSION,
        process.pid = std::process::id()
    )
    .entered()
}
