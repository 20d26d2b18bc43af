//! Naive top-rung curriculum

use super::policy::{Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};
use crate::error::{EnsenarError, Result};

/// Trains at the hardest rung from the first round and stops once the
/// held-out success probability clears the target rate.
///
/// The no-curriculum baseline: whatever the ladder offers below the top
/// is never used.
#[derive(Debug, Clone)]
pub struct NaiveTeacher {
    top: usize,
    target_rate: f64,
    steps: usize,
    done: bool,
}

impl NaiveTeacher {
    /// Teacher over a ladder of `num_rungs` rungs, target rate 0.95.
    pub fn new(num_rungs: usize) -> Result<Self> {
        if num_rungs == 0 {
            return Err(EnsenarError::EmptySchedule);
        }
        Ok(Self {
            top: num_rungs - 1,
            target_rate: 0.95,
            steps: DEFAULT_CHECKPOINT_STEPS,
            done: false,
        })
    }

    /// Set the success rate that ends the run.
    pub fn with_target_rate(mut self, target_rate: f64) -> Self {
        self.target_rate = target_rate;
        self
    }

    /// Set the per-checkpoint training duration.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }
}

impl Teacher for NaiveTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        if self.done {
            return None;
        }
        Some(Checkpoint { rung: self.top, steps: self.steps })
    }

    fn update(&mut self, _transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision {
        if last.success_prob > self.target_rate {
            self.done = true;
            return Decision::Done;
        }
        Decision::Continue
    }

    fn name(&self) -> &str {
        "naive"
    }
}
