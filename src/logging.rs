//! Logging configuration for rds-data-mapper.
//!
//! Logs go to stderr so stdout carries only the mapped record.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// `RUST_LOG` takes precedence; otherwise `info` is used, or `debug` for
/// this crate when `verbose` is set.
pub fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,rds_data_mapper=debug"
    } else {
        "info"
    }
}
