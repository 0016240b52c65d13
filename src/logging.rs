use env_logger::{Builder, Env};

/// Starts the process-wide logger. `default_level` applies unless `RUST_LOG`
/// is set. Calling it again is a no-op.
pub fn init_logging(default_level: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .try_init();
}
