use anyhow::{Result, anyhow};
use clap::ArgMatches;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default log directive
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Number of `-v` flags given on the command line
#[must_use]
pub fn extract_verbosity(matches: &ArgMatches) -> u8 {
    matches.get_count("verbose")
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flags. Logs go to stderr
/// so stdout only carries the JSON report.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(verbosity: u8) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
