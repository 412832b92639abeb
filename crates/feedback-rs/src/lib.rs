//! Public surface for feedback-rs.
//!
//! Re-exports the building blocks and hosts the console front end used by
//! the `feedback` binary: the menu loop and its table and chart rendering.

pub mod chart;
pub mod menu;
pub mod render;

/// Re-export for convenience.
pub use feedback_rs_classifier as classifier;
/// Re-export for convenience.
pub use feedback_rs_config as config;
/// Re-export for convenience.
pub use feedback_rs_store as store;

pub use menu::Menu;

#[inline]
/// Initialize logging through env_logger.
///
/// Warnings and errors are shown by default; `RUST_LOG` overrides the level.
/// Calling this more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();
}
