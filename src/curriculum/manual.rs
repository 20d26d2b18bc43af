//! Manual preset curriculum

use super::policy::{Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};

/// A preset checkpoint list, consumed one assignment per round.
///
/// Carries no statistical logic; serves as the control baseline against
/// the confidence-driven policies.
///
/// # Example
///
/// ```
/// use ensenar::curriculum::{ManualTeacher, Teacher};
///
/// let mut teacher = ManualTeacher::new()
///     .with_checkpoint(0, 1000)
///     .with_checkpoint(1, 2000);
///
/// assert_eq!(teacher.next_checkpoint().unwrap().rung, 0);
/// assert_eq!(teacher.next_checkpoint().unwrap().steps, 2000);
/// assert!(teacher.next_checkpoint().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTeacher {
    plan: Vec<Checkpoint>,
    cursor: usize,
}

impl ManualTeacher {
    /// Empty plan; add assignments with [`with_checkpoint`](Self::with_checkpoint).
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan from an explicit checkpoint list.
    pub fn from_plan(plan: Vec<Checkpoint>) -> Self {
        Self { plan, cursor: 0 }
    }

    /// Append one assignment to the plan.
    pub fn with_checkpoint(mut self, rung: usize, steps: usize) -> Self {
        self.plan.push(Checkpoint { rung, steps });
        self
    }

    /// Append one assignment with the default training duration.
    pub fn with_rung(self, rung: usize) -> Self {
        self.with_checkpoint(rung, DEFAULT_CHECKPOINT_STEPS)
    }

    /// Assignments not yet handed out.
    pub fn remaining(&self) -> usize {
        self.plan.len() - self.cursor
    }
}

impl Teacher for ManualTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        let ckpt = self.plan.get(self.cursor).copied();
        if ckpt.is_some() {
            self.cursor += 1;
        }
        ckpt
    }

    fn update(&mut self, _transcripts: &mut TranscriptMap, _last: TrajectoryPoint) -> Decision {
        Decision::Continue
    }

    fn name(&self) -> &str {
        "manual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_consumed_in_order_then_exhausted() {
        let plan = vec![
            Checkpoint { rung: 0, steps: 100 },
            Checkpoint { rung: 2, steps: 200 },
            Checkpoint { rung: 1, steps: 300 },
        ];
        let mut teacher = ManualTeacher::from_plan(plan.clone());

        for expected in &plan {
            assert_eq!(teacher.next_checkpoint(), Some(*expected));
        }
        assert!(teacher.next_checkpoint().is_none());
        assert!(teacher.next_checkpoint().is_none());
    }

    #[test]
    fn test_update_never_terminates() {
        let mut teacher = ManualTeacher::new().with_rung(0);
        let mut transcripts = TranscriptMap::new();
        let decision = teacher.update(
            &mut transcripts,
            TrajectoryPoint { rung: 0, success_prob: 1.0 },
        );
        assert_eq!(decision, Decision::Continue);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut teacher = ManualTeacher::new().with_rung(0).with_rung(1);
        assert_eq!(teacher.remaining(), 2);
        teacher.next_checkpoint();
        assert_eq!(teacher.remaining(), 1);
    }
}
