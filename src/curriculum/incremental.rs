//! Incremental one-rung-at-a-time curriculum

use super::policy::{Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};
use crate::error::{EnsenarError, Result};

/// Climbs one rung whenever the held-out success probability clears the
/// target rate; never retreats; done once the rung reaches the goal.
///
/// # Example
///
/// ```
/// use ensenar::curriculum::{Decision, IncrementalTeacher, Teacher, TrajectoryPoint, TranscriptMap};
///
/// let mut teacher = IncrementalTeacher::new(2).unwrap();
/// let mut transcripts = TranscriptMap::new();
/// let good = |rung| TrajectoryPoint { rung, success_prob: 0.96 };
///
/// assert_eq!(teacher.next_checkpoint().unwrap().rung, 0);
/// assert_eq!(teacher.update(&mut transcripts, good(0)), Decision::Continue);
/// assert_eq!(teacher.next_checkpoint().unwrap().rung, 1);
/// assert_eq!(teacher.update(&mut transcripts, good(1)), Decision::Done);
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalTeacher {
    rung: usize,
    goal: usize,
    target_rate: f64,
    steps: usize,
    done: bool,
}

impl IncrementalTeacher {
    /// Climb from rung 0 toward `goal` rungs, target rate 0.95.
    pub fn new(goal: usize) -> Result<Self> {
        if goal == 0 {
            return Err(EnsenarError::invalid("goal", "must be at least 1"));
        }
        Ok(Self {
            rung: 0,
            goal,
            target_rate: 0.95,
            steps: DEFAULT_CHECKPOINT_STEPS,
            done: false,
        })
    }

    /// Set the success rate required to climb.
    pub fn with_target_rate(mut self, target_rate: f64) -> Self {
        self.target_rate = target_rate;
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
}

impl Teacher for IncrementalTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        if self.done {
            return None;
        }
        Some(Checkpoint { rung: self.rung, steps: self.steps })
    }

    fn update(&mut self, _transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision {
        if last.success_prob > self.target_rate {
            self.rung += 1;
            if self.rung >= self.goal {
                self.done = true;
                return Decision::Done;
            }
        }
        Decision::Continue
    }

    fn name(&self) -> &str {
        "incremental"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(rung: usize, success_prob: f64) -> TrajectoryPoint {
        TrajectoryPoint { rung, success_prob }
    }

    #[test]
    fn test_climbs_only_on_cleared_target() {
        let mut teacher = IncrementalTeacher::new(5).unwrap();
        let mut transcripts = TranscriptMap::new();

        teacher.update(&mut transcripts, point(0, 0.95));
        assert_eq!(teacher.rung(), 0, "exactly at the target must not climb");

        teacher.update(&mut transcripts, point(0, 0.96));
        assert_eq!(teacher.rung(), 1);
    }

    #[test]
    fn test_never_retreats() {
        let mut teacher = IncrementalTeacher::new(5).unwrap();
        let mut transcripts = TranscriptMap::new();
        let mut prev = teacher.rung();
        for prob in [0.99, 0.1, 0.0, 0.99, 0.2, 0.97] {
            teacher.update(&mut transcripts, point(prev, prob));
            assert!(teacher.rung() >= prev);
            prev = teacher.rung();
        }
    }

    #[test]
    fn test_exhausts_after_goal_successful_rounds() {
        let goal = 4;
        let mut teacher = IncrementalTeacher::new(goal).unwrap();
        let mut transcripts = TranscriptMap::new();

        let mut visited = Vec::new();
        for round in 0..goal {
            visited.push(teacher.next_checkpoint().unwrap().rung);
            let decision = teacher.update(&mut transcripts, point(visited[round], 0.96));
            if round + 1 < goal {
                assert_eq!(decision, Decision::Continue);
            } else {
                assert_eq!(decision, Decision::Done);
            }
        }
        assert_eq!(visited, vec![0, 1, 2, 3]);
        assert!(teacher.next_checkpoint().is_none());
    }

    #[test]
    fn test_rejects_zero_goal() {
        assert!(IncrementalTeacher::new(0).is_err());
    }
}
