//! Diagnostic logging for the carton CLI.
//!
//! Pipeline diagnostics go through `tracing` and are written to stderr, so
//! stdout carries only command results. The filter is read from
//! `CARTON_LOG` using the usual `EnvFilter` directive syntax.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CARTON_LOG";

const DEFAULT_FILTER: &str = "carton=info";
const QUIET_FILTER: &str = "carton=warn";

/// Installs the global subscriber.
///
/// `quiet` lowers the default level to warnings. An explicit `CARTON_LOG`
/// always wins.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet)));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

fn default_filter(quiet: bool) -> &'static str {
    if quiet { QUIET_FILTER } else { DEFAULT_FILTER }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_lowers_default_level() {
        assert_eq!(default_filter(false), "carton=info");
        assert_eq!(default_filter(true), "carton=warn");
    }

    #[test]
    fn default_filters_parse() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
        assert!(QUIET_FILTER.parse::<EnvFilter>().is_ok());
    }
}
