//! Test utilities for depgraph
//!
//! Shared by unit tests and, through the `test-utils` feature, by the integration
//! tests under `tests/`.

pub mod fixtures;

pub use fixtures::{SAMPLE_ASSETS_JSON, app_scenario, library, sample_lock_file};

use std::cell::RefCell;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::logging::{LogLevel, LogSink};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise `RUST_LOG`;
/// with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A [`LogSink`] that records every message it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    /// Messages received so far, in order.
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.borrow().clone()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: LogLevel, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}
