//! Append-only session sink: the engine's narrow persistence interface.
//!
//! The engine never touches files or storage directly; it records
//! [`SessionEvent`]s through an injected [`SessionSink`]. Sinks must
//! tolerate concurrent writers without interleaving corruption — both
//! implementations here guard each whole-event append with a mutex. Write
//! failures are logged and swallowed: persistence problems must not abort a
//! solving session.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::SessionOutcome;

/// One append-only log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Emitted when a session begins, before any Generator call.
    SessionStarted {
        problem_id: String,
        task_type: String,
        timestamp: DateTime<Utc>,
    },
    /// Emitted when a session finishes, carrying the full outcome snapshot.
    SessionCompleted {
        timestamp: DateTime<Utc>,
        outcome: Box<SessionOutcome>,
    },
}

/// Append-only event sink.
///
/// **Interaction**: Injected into [`Engine`](crate::engine::Engine);
/// `record` is called from concurrently running sessions and must be safe
/// for that. Implementations: [`NullSink`], [`MemorySink`], [`JsonlSink`].
pub trait SessionSink: Send + Sync {
    /// Appends one event. Must not panic; failures are the sink's problem.
    fn record(&self, event: SessionEvent);
}

/// Discards every event. The default sink.
pub struct NullSink;

impl SessionSink for NullSink {
    fn record(&self, _event: SessionEvent) {}
}

/// In-memory sink for tests and inspection.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<SessionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in append order.
    pub fn events(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionSink for MemorySink {
    fn record(&self, event: SessionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// File sink writing one JSON object per line.
///
/// The file handle is opened in append mode and each event is serialized
/// and written as a single line under the lock, so lines from concurrent
/// sessions never interleave.
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    /// Opens (creating if needed) the log file for appending.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SessionSink for JsonlSink {
    fn record(&self, event: SessionEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "session event serialization failed");
                return;
            }
        };
        let Ok(mut file) = self.file.lock() else {
            warn!("session sink lock poisoned; dropping event");
            return;
        };
        if let Err(e) = writeln!(file, "{}", line) {
            warn!(error = %e, "session sink write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn started(problem_id: &str) -> SessionEvent {
        SessionEvent::SessionStarted {
            problem_id: problem_id.to_string(),
            task_type: "math_problems".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.record(started("a"));
        sink.record(started("b"));
        let events = sink.events();
        assert_eq!(events.len(), 2);
        match &events[0] {
            SessionEvent::SessionStarted { problem_id, .. } => assert_eq!(problem_id, "a"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn jsonl_sink_writes_one_parseable_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.jsonl");
        let sink = JsonlSink::create(&path).unwrap();
        sink.record(started("p1"));
        sink.record(started("p2"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["event"], "session_started");
        }
    }

    #[tokio::test]
    async fn jsonl_sink_tolerates_concurrent_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concurrent.jsonl");
        let sink = Arc::new(JsonlSink::create(&path).unwrap());

        let mut handles = Vec::new();
        for i in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                for j in 0..25 {
                    sink.record(SessionEvent::SessionStarted {
                        problem_id: format!("w{}-{}", i, j),
                        task_type: "t".to_string(),
                        timestamp: Utc::now(),
                    });
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).expect("no interleaved lines");
        }
    }
}
