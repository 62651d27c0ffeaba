use std::io::stderr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Takes precedence over `--log-level`, e.g. `CARDSCOPE_LOG=cardscope_core=debug`.
pub const LOG_ENV: &str = "CARDSCOPE_LOG";

pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
        EnvFilter::new("warn")
    })
}

pub fn setup_logging(level: &str) {
    // stdout carries the JSON report, so logs go to stderr
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| filter_for(level));
    let terminal_log = fmt::layer().with_target(false).with_writer(stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(terminal_log)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_levels() {
        assert_eq!(filter_for("debug").to_string(), "debug");
        assert_eq!(filter_for("cardscope_core=loud").to_string(), "warn");
    }
}
