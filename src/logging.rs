//! Log sink handed to the lock file reader.
//!
//! Lock files carry their own diagnostics (restore warnings and errors recorded by the
//! package manager). The reader reports those, and its own warnings, through the narrow
//! [`LogSink`] capability instead of calling `tracing` directly, so callers can capture
//! them. [`TracingLogSink`] is the production sink and forwards to `tracing`.

use serde::Deserialize;
use std::fmt;

/// Severity levels used by lock file diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum LogLevel {
    /// Internal detail
    Debug,
    /// Chatty progress output
    Verbose,
    /// Normal informational output
    Information,
    /// Informational output that should be shown even in minimal mode
    Minimal,
    /// Something suspicious that did not stop the read
    Warning,
    /// A recorded failure
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Verbose => "verbose",
            Self::Information => "information",
            Self::Minimal => "minimal",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Capability for receiving diagnostics.
pub trait LogSink {
    /// Record one message at the given level.
    fn log(&self, level: LogLevel, message: &str);
}

/// [`LogSink`] that forwards every message to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Verbose => tracing::trace!(target: "depgraph::lockfile", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "depgraph::lockfile", "{message}"),
            LogLevel::Information | LogLevel::Minimal => {
                tracing::info!(target: "depgraph::lockfile", "{message}");
            }
            LogLevel::Warning => tracing::warn!(target: "depgraph::lockfile", "{message}"),
            LogLevel::Error => tracing::error!(target: "depgraph::lockfile", "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    /// Records the level and target of every event.
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            self.events.lock().unwrap().push((*metadata.level(), metadata.target().to_string()));
        }
    }

    fn captured_level(level: LogLevel) -> Level {
        let capture = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || TracingLogSink.log(level, "example"));

        let events = capture.events.lock().unwrap();
        assert_eq!(events.len(), 1, "one event for {level}");
        assert_eq!(events[0].1, "depgraph::lockfile");
        events[0].0
    }

    #[test]
    fn test_tracing_sink_level_mapping() {
        let expected = [
            (LogLevel::Debug, Level::DEBUG),
            (LogLevel::Verbose, Level::TRACE),
            (LogLevel::Information, Level::INFO),
            (LogLevel::Minimal, Level::INFO),
            (LogLevel::Warning, Level::WARN),
            (LogLevel::Error, Level::ERROR),
        ];

        for (level, tracing_level) in expected {
            assert_eq!(captured_level(level), tracing_level, "mapping for {level}");
        }
    }

    #[test]
    fn test_level_deserializes_from_lock_file_names() {
        let level: LogLevel = serde_json::from_str("\"Warning\"").unwrap();
        assert_eq!(level, LogLevel::Warning);

        let level: LogLevel = serde_json::from_str("\"Minimal\"").unwrap();
        assert_eq!(level, LogLevel::Minimal);
    }
}
