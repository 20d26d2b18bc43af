//! Checkpoint controller, telemetry sinks, and replication
//!
//! One [`CheckpointRunner`] owns a single teacher/student run: it turns
//! the policy's checkpoints into training and evaluation rounds, keeps
//! the trajectory and per-rung transcripts, and reports how the run
//! ended. [`replicate`] repeats a whole configuration across seeds and
//! aggregates round counts.

mod replicate;
mod runner;
mod sink;


// Re-export all public types
pub use replicate::{replicate, ReplicationReport};
pub use runner::{
    estimate_success, CheckpointRunner, RunConfig, RunOutcome, RunReport, DEFAULT_EVAL_EPISODES,
};
pub use sink::{JsonlSink, MemorySink, ProgressSink, RecordSink, ScalarKey, ScalarRecord};
