//! Logger setup shared by the `tiapp` and `tiapp-install-module` binaries.
//!
//! The library itself only emits records through the `log` facade.

/// Initialize `env_logger` at `level`; `RUST_LOG` takes precedence when set.
///
/// Calling this more than once is harmless: later calls leave the first
/// logger in place.
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
