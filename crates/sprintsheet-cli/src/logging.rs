//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,sprintsheet=debug";

/// Filter directives for the given verbosity.
///
/// `--verbose` wins over `RUST_LOG`; otherwise `RUST_LOG` wins over
/// [`DEFAULT_FILTER`].
pub fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{directives}': {e}");
        EnvFilter::new(DEFAULT_FILTER)
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
