//! Tracing setup for the terminal binary.
//!
//! The terminal runs in the alternate screen, so events go to a log file
//! rather than stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "emoji_guess=info,emoji_guess_core=info,emoji_guess_store=info";

/// Install a file-backed subscriber. `RUST_LOG` overrides the default filter.
///
/// Returns false (and installs nothing) when `path` is `None` or the file
/// cannot be opened.
pub fn init_tracing(path: Option<&Path>) -> bool {
    let Some(path) = path else {
        return false;
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok()
}
