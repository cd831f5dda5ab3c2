//! Log output for the `numpool` binary.
//!
//! Engine events are emitted through `tracing` and written to stderr by a
//! `fmt` layer, so stdout carries only the run report. Verbosity follows
//! `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! RUST_LOG=numpool=debug numpool --max-entries 10000
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
