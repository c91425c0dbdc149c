// SPDX-License-Identifier: MPL-2.0
//! Logging setup.
//!
//! Installs a `tracing` subscriber writing to stderr. The filter comes from
//! `RUST_LOG` when set, otherwise the crate logs at `info` (or `debug` with
//! `--verbose`) and dependencies at `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "memories_bed=info,warn";
const VERBOSE_FILTER: &str = "memories_bed=debug,warn";

/// Initialize the logging system.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("logging initialized");
    }
}
