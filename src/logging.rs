//! Logging init: structured events to stderr, stdout stays for command output.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,head_embed=info";
const VERBOSE_FILTER: &str = "info,head_embed=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be set (e.g. by a host embedding the crate)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
