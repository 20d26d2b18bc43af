//! Curriculum policies for teacher-driven training
//!
//! Implements automatic curriculum generation in the teacher-student
//! framing described in:
//! - Matiisen et al. (2019) "Teacher-Student Curriculum Learning"
//! - Graves et al. (2017) "Automated Curriculum Learning for Neural Networks"
//!
//! A [`Teacher`] walks a difficulty ladder (a [`Schedule`] of rungs) by
//! emitting checkpoints, reading the per-rung evaluation transcripts the
//! controller collects, and deciding when the student has mastered the
//! final rung. Policies range from a fixed hand-written plan
//! ([`ManualTeacher`]) through evidence-driven climbers
//! ([`IncrementalTeacher`], [`OscillatingTeacher`], [`AdaptiveTeacher`])
//! to ablation baselines ([`NaiveTeacher`], [`RandomTeacher`]).

mod adaptive;
mod incremental;
mod manual;
mod naive;
mod oscillating;
mod policy;
mod random;
mod schedule;
mod transcript;


// Re-export all public types
pub use adaptive::{AdaptiveTeacher, FINAL_SUCCESS_BAR};
pub use incremental::IncrementalTeacher;
pub use manual::ManualTeacher;
pub use naive::NaiveTeacher;
pub use oscillating::OscillatingTeacher;
pub use policy::{Checkpoint, Decision, Teacher, TrajectoryPoint, DEFAULT_CHECKPOINT_STEPS};
pub use random::RandomTeacher;
pub use schedule::Schedule;
pub use transcript::{interleave, TranscriptMap};
