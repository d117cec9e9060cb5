//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    // A second initialization (e.g. from several tests) is harmless.
    let _ = env_logger::try_init();
}

/// Initialize logging with a default filter such as `"info"` or
/// `"arcade_engine=debug"`, still overridable through `RUST_LOG`
pub fn init_with_level(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

/// Initialize logging for tests (captured by the test harness)
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
