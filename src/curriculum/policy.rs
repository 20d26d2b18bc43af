//! The teacher contract shared by every scheduling policy

use serde::{Deserialize, Serialize};

use super::TranscriptMap;

/// Default training duration per checkpoint, in environment steps.
pub const DEFAULT_CHECKPOINT_STEPS: usize = 2000;

/// One training assignment: which rung to train at and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Difficulty rung the student trains at
    pub rung: usize,
    /// Training duration in environment steps
    pub steps: usize,
}

/// One completed round: where the student trained and how it evaluated
/// on the held-out environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Rung the round trained at
    pub rung: usize,
    /// Fraction of held-out evaluation episodes that succeeded
    pub success_prob: f64,
}

/// Verdict of a policy's update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep training; the next checkpoint may sit at a different rung.
    Continue,
    /// Re-evaluate on the confirmation environment before deciding.
    Confirm,
    /// Stopping condition met; the curriculum is complete.
    Done,
}

/// A curriculum teacher: hands out checkpoints and digests round feedback.
///
/// The checkpoint controller owns the transcripts and the trajectory; the
/// teacher reads (and spends) transcript evidence during `update` and
/// moves its rung assignment accordingly. `update` runs exactly once per
/// completed round, after the first checkpoint has been trained.
pub trait Teacher {
    /// The next training assignment, or `None` once a preset plan is
    /// consumed.
    fn next_checkpoint(&mut self) -> Option<Checkpoint>;

    /// Digest feedback from the round just completed.
    fn update(&mut self, transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision;

    /// Follow-up to [`Decision::Confirm`]: receives the success
    /// probability measured on the confirmation environment. Policies
    /// that never ask for confirmation keep the default.
    fn confirm(&mut self, success_prob: f64) -> Decision {
        let _ = success_prob;
        Decision::Done
    }

    /// Policy name for logs and error messages.
    fn name(&self) -> &str;
}

/// Clamp a rung to the inclusive upper bound `top`.
pub(crate) fn clamp_rung(rung: usize, top: usize) -> usize {
    rung.min(top)
}
