use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CarouscrollError, Result};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "CAROUSCROLL_LOG";

/// Where diagnostics are written
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Standard error, for non-interactive commands
    Stderr,
    /// Append to a file; the TUI owns the terminal
    File(PathBuf),
}

impl LogTarget {
    /// ~/.carouscroll.log, or stderr when there is no home directory
    pub fn default_file() -> Self {
        match dirs::home_dir() {
            Some(home) => LogTarget::File(home.join(".carouscroll.log")),
            None => LogTarget::Stderr,
        }
    }
}

/// Install the global `tracing` subscriber
pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| CarouscrollError::Logging(e.to_string()))
}
