//! Opt-in file logging

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the log file
pub const LOG_ENV: &str = "WEATHER_SEARCH_LOG";

/// Initialize tracing when `WEATHER_SEARCH_LOG` names a file.
///
/// Logging is off otherwise; writing to the terminal would corrupt the UI.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let Some(log_path) = std::env::var_os(LOG_ENV) else {
        return;
    };

    let file = match std::fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: failed to create log file {}: {}",
                log_path.to_string_lossy(),
                e
            );
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
