//! Tracing initialisation.
//!
//! Log filtering follows `RUST_LOG` (default `info`), e.g.
//!
//! ```bash
//! RUST_LOG=jlcsearch=debug,tower_http=debug jlcsearch -f config.yaml
//! ```
//!
//! `log_format: json` in the config switches the console output to one JSON object per line.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogFormat;

/// Install the global tracing subscriber.
pub fn init_telemetry(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    info!("Telemetry initialized ({:?} logs)", format);

    Ok(())
}
