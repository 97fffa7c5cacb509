use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Overrides the log filter, e.g. `LIFE_MACHINE_LOG=life_machine_operations=trace`.
pub(crate) const LOG_ENV: &str = "LIFE_MACHINE_LOG";

pub(crate) fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
