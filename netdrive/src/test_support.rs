//! Shared test setup.

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Initialize `env_logger` once per test binary, so `RUST_LOG=debug` works
/// across the suite without double-initialization panics.
pub fn init_logging() {
    LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
