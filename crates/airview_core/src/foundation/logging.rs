//! Logging bootstrap

pub use log::{debug, error, info, trace, warn};

/// Initialize env_logger with filtering taken from the environment.
pub fn init() {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

/// Initialize env_logger with a default level; `RUST_LOG` still wins.
pub fn init_with_level(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
