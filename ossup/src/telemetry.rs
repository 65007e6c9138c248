//! Tracing initialisation for the `ossup` binary.
//!
//! Log levels come from `RUST_LOG` (e.g. `RUST_LOG=ossup=debug`) and default to `info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Logs go to stderr so stdout stays clean for the signed URLs the CLI prints.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    tracing::debug!("Telemetry initialized");
    Ok(())
}
