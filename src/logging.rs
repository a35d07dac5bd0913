//! Logging init: structured tracing output on stderr

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,wiki_localurl=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
