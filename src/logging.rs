//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the binary. Logs go to stderr so they never mix with command
//! output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "study_chat=warn";

/// Filter used when `RUST_LOG` is unset and `--verbose` is given.
const VERBOSE_FILTER: &str = "study_chat=debug";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
        tracing::debug!("still fine");
    }
}
