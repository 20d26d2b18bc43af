//! Random-rung baseline curriculum

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::policy::{Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};
use crate::error::{EnsenarError, Result};

/// Trains at uniformly random rungs; an ablation baseline against the
/// structured schedules.
///
/// When the held-out success probability clears the bar, the policy asks
/// the controller to confirm on an independent target environment; a
/// confirmed pass ends the run, anything else draws a fresh random rung.
/// Sampling covers the full schedule and draws from the policy's own
/// seeded generator.
#[derive(Debug, Clone)]
pub struct RandomTeacher {
    rung: usize,
    num_rungs: usize,
    bar: f64,
    steps: usize,
    rng: StdRng,
    done: bool,
}

impl RandomTeacher {
    /// Teacher over a ladder of `num_rungs` rungs with bar 0.9.
    pub fn new(num_rungs: usize, seed: u64) -> Result<Self> {
        if num_rungs == 0 {
            return Err(EnsenarError::EmptySchedule);
        }
        Ok(Self {
            rung: 0,
            num_rungs,
            bar: 0.9,
            steps: DEFAULT_CHECKPOINT_STEPS,
            rng: StdRng::seed_from_u64(seed),
            done: false,
        })
    }

    /// Set the success bar checked on both evaluations.
    pub fn with_bar(mut self, bar: f64) -> Self {
        self.bar = bar;
        self
    }

    /// Set the per-checkpoint training duration.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Current rung assignment.
    pub fn rung(&self) -> usize {
        self.rung
    }

    fn resample(&mut self) {
        self.rung = self.rng.random_range(0..self.num_rungs);
    }
}

impl Teacher for RandomTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        if self.done {
            return None;
        }
        Some(Checkpoint { rung: self.rung, steps: self.steps })
    }

    fn update(&mut self, _transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision {
        if last.success_prob > self.bar {
            return Decision::Confirm;
        }
        self.resample();
        Decision::Continue
    }

    fn confirm(&mut self, success_prob: f64) -> Decision {
        if success_prob > self.bar {
            self.done = true;
            return Decision::Done;
        }
        self.resample();
        Decision::Continue
    }

    fn name(&self) -> &str {
        "random"
    }
}
