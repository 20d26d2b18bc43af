//! Scalar record sinks for per-checkpoint telemetry

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Name of a scalar emitted once per completed checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKey {
    /// Rung the round trained at
    DifficultyIndex,
    /// Held-out success probability after the round
    SuccessProbability,
}

impl ScalarKey {
    /// Record name as it appears in logs and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DifficultyIndex => "difficulty_index",
            Self::SuccessProbability => "success_probability",
        }
    }
}

/// One named scalar attributed to a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarRecord {
    /// Round index (0-based)
    pub round: usize,
    /// Record name
    pub key: ScalarKey,
    /// Scalar value
    pub value: f64,
}

/// Sink accepting named scalar records, one pair per checkpoint.
///
/// The runner dispatches to every attached sink; attaching none is a
/// no-op. Implementations must not panic on write failure.
pub trait RecordSink: Send {
    /// Accept one scalar for a completed round.
    fn record(&mut self, record: ScalarRecord);

    /// Called once after the final round.
    fn finish(&mut self) {}

    /// Sink name for diagnostics.
    fn name(&self) -> &'static str {
        "RecordSink"
    }
}

/// Collects records in memory behind a shared handle.
///
/// Cloning the sink clones the handle, so a test can attach one clone to
/// a runner and read the records back from the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ScalarRecord>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<ScalarRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordSink for MemorySink {
    fn record(&mut self, record: ScalarRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn name(&self) -> &'static str {
        "MemorySink"
    }
}

/// Prints one line per record to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSink;

impl RecordSink for ProgressSink {
    fn record(&mut self, record: ScalarRecord) {
        println!(
            "round {}: {} = {:.4}",
            record.round,
            record.key.as_str(),
            record.value
        );
    }

    fn name(&self) -> &'static str {
        "ProgressSink"
    }
}

/// Writes records as JSON lines to any writer.
///
/// Write failures are counted rather than propagated; telemetry must not
/// abort a run. Check `dropped()` after the run if completeness matters.
#[derive(Debug)]
pub struct JsonlSink<W: Write + Send> {
    writer: W,
    dropped: usize,
}

impl<W: Write + Send> JsonlSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, dropped: 0 }
    }

    /// Number of records lost to serialization or write errors.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RecordSink for JsonlSink<W> {
    fn record(&mut self, record: ScalarRecord) {
        match serde_json::to_string(&record) {
            Ok(json) => {
                if writeln!(self.writer, "{json}").is_err() {
                    self.dropped += 1;
                }
            }
            Err(_) => self.dropped += 1,
        }
    }

    fn finish(&mut self) {
        if self.writer.flush().is_err() {
            self.dropped += 1;
        }
    }

    fn name(&self) -> &'static str {
        "JsonlSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(round: usize, value: f64) -> ScalarRecord {
        ScalarRecord {
            round,
            key: ScalarKey::SuccessProbability,
            value,
        }
    }

    #[test]
    fn test_scalar_key_names() {
        assert_eq!(ScalarKey::DifficultyIndex.as_str(), "difficulty_index");
        assert_eq!(ScalarKey::SuccessProbability.as_str(), "success_probability");
    }

    #[test]
    fn test_memory_sink_shares_records_across_clones() {
        let sink = MemorySink::new();
        let mut attached = sink.clone();
        attached.record(sample(0, 0.5));
        attached.record(sample(1, 0.75));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].round, 1);
        assert_eq!(records[1].value, 0.75);
    }

    #[test]
    fn test_jsonl_sink_writes_one_line_per_record() {
        let mut sink = JsonlSink::new(Vec::new());
        sink.record(ScalarRecord {
            round: 3,
            key: ScalarKey::DifficultyIndex,
            value: 2.0,
        });
        sink.record(sample(3, 0.8));
        sink.finish();
        assert_eq!(sink.dropped(), 0);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"difficulty_index\""));
        assert!(lines[0].contains("\"round\":3"));
        assert!(lines[1].contains("\"success_probability\""));
    }

    #[test]
    fn test_progress_sink_does_not_panic() {
        let mut sink = ProgressSink;
        sink.record(sample(0, 1.0));
        sink.finish();
        assert_eq!(sink.name(), "ProgressSink");
    }
}
