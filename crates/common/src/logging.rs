use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::PollError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Events go to stderr and,
/// when `log_file` is set, are also appended to that file without ANSI colours.
pub fn init_tracing(default_filter: &str, log_file: Option<&Path>) -> Result<(), PollError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| PollError::Config(format!("tracing already initialised: {}", e)))
}
