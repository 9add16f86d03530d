//! Tracing setup. The terminal belongs to the UI, so log output goes to a file.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "DASHUI_LOG";
pub const DEFAULT_FILTER: &str = "dashui=info";

/// `DASHUI_LOG` if set and valid, otherwise `dashui=debug` in debug mode or
/// [`DEFAULT_FILTER`].
pub fn env_filter(debug: bool) -> EnvFilter {
    let fallback = if debug { "dashui=debug" } else { DEFAULT_FILTER };
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber, appending to `log_path`.
pub fn init(log_path: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .wrap_err_with(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .wrap_err("Failed to install log subscriber")?;
    Ok(())
}
