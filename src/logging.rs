//! Diagnostic logging setup.
//!
//! Everything logs through `tracing`. The filter comes from `CORDIAL_LOG`
//! (same syntax as `RUST_LOG`) and defaults to `info`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CORDIAL_LOG";
const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
        tracing::info!("logging initialised");
    }
}
