//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// tinsel::core::logging::init();
/// log::info!("Scene started");
/// ```
pub fn init() {
    // try_init so tests and embedders that already installed a logger keep theirs
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
