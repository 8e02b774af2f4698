//! Tracing setup. Logs go to a file; the terminal belongs to the clock.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "DIAL_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "dial.log";

/// Install the global subscriber, appending to `dial.log` in the platform
/// data directory. Returns the log path, or `None` when logging is off
/// because the file could not be opened.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dial")?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .ok()?;
    Some(path)
}
