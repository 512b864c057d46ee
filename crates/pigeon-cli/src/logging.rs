//! Log setup.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Highest accepted verbosity; larger values are clamped.
pub const MAX_VERBOSITY: u8 = 7;

/// Maps the `-v` verbosity (1 to 7) onto a log level.
///
/// 1 is debug, 2 info, 3 warn, anything from 4 up is error. Values outside
/// the table fall back to debug.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity.min(MAX_VERBOSITY) {
        1 => "debug",
        2 => "info",
        3 => "warn",
        4..=MAX_VERBOSITY => "error",
        _ => "debug",
    }
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG`, when set and valid, takes precedence over `verbosity`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<()> {
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("failed to initialize logging")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(1), "debug");
        assert_eq!(level_for_verbosity(2), "info");
        assert_eq!(level_for_verbosity(3), "warn");
        assert_eq!(level_for_verbosity(4), "error");
        assert_eq!(level_for_verbosity(7), "error");
    }

    #[test]
    fn test_second_init_is_reported() {
        // only the second call is guaranteed to find a subscriber installed
        let _ = init(2);
        let err = init(2).unwrap_err();
        assert!(err.to_string().contains("failed to initialize logging"));
    }

    #[test]
    fn test_out_of_range_verbosity() {
        assert_eq!(level_for_verbosity(0), "debug");
        assert_eq!(level_for_verbosity(200), "error");
    }
}
