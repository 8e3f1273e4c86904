//! Diagnostics sink for lookup failures
//!
//! Lookups report misses through a [`DiagnosticSink`] owned by the table
//! instead of global logging macros. This keeps the severity tiers
//! controllable per table and lets tests assert on what was reported.
//!
//! # Severity tiers
//!
//! - Lookups the caller expects to succeed (key field by id or name, action
//!   by id or name) report at [`Severity::Error`].
//! - Container resolution misses report at the configured probe severity
//!   (trace by default), since those searches probe several scopes.
//! - Plain data field probes report nothing.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A single reported lookup failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: SchemaError,
}

/// Receiver of lookup diagnostics
///
/// Implementations must be cheap and must not fail; they are called from
/// read-only query paths that may run on many threads at once.
pub trait DiagnosticSink: Send + Sync {
    /// Report a lookup failure at the given severity
    fn report(&self, severity: Severity, error: &SchemaError);
}

/// Shared handle to a sink, as stored in a table
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Sink that forwards diagnostics to `tracing`
///
/// This is the default sink for tables built without an explicit one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, severity: Severity, error: &SchemaError) {
        let table = error.table();
        match severity {
            Severity::Error => tracing::error!(table, status = ?error.status(), "{}", error),
            Severity::Warn => tracing::warn!(table, status = ?error.status(), "{}", error),
            Severity::Info => tracing::info!(table, status = ?error.status(), "{}", error),
            Severity::Debug => tracing::debug!(table, status = ?error.status(), "{}", error),
            Severity::Trace => tracing::trace!(table, status = ?error.status(), "{}", error),
        }
    }
}

/// Sink that drops every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _severity: Severity, _error: &SchemaError) {}
}

/// Sink that records diagnostics in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Number of recorded diagnostics at exactly this severity
    pub fn count_at(&self, severity: Severity) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Take all recorded diagnostics, leaving the sink empty
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, severity: Severity, error: &SchemaError) {
        self.records.lock().push(Diagnostic {
            severity,
            error: error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown_action() -> SchemaError {
        SchemaError::UnknownAction {
            table: "t".to_string(),
            action_id: 999,
        }
    }

    #[test]
    fn test_recording_sink_records_in_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.report(Severity::Error, &unknown_action());
        sink.report(Severity::Trace, &unknown_action());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count_at(Severity::Error), 1);
        assert_eq!(sink.count_at(Severity::Trace), 1);
        assert_eq!(sink.records()[0].severity, Severity::Error);

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracing_sink_under_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();

        let sink = TracingSink;
        for severity in [
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
        ] {
            sink.report(severity, &unknown_action());
        }
    }

    #[test]
    fn test_null_sink_through_shared_handle() {
        let sink: SharedSink = Arc::new(NullSink);
        sink.report(Severity::Error, &unknown_action());
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Trace < Severity::Debug);
        assert_eq!(Severity::Warn.to_string(), "warn");
    }

    #[test]
    fn test_sinks_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingSink>();
        assert_send_sync::<RecordingSink>();
        assert_send_sync::<SharedSink>();
    }
}
