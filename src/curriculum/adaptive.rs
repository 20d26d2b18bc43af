//! Adaptive coarse-to-fine curriculum

use super::policy::{Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};
use crate::error::{EnsenarError, Result};
use crate::stats::EvidenceSpec;

/// Success bar for terminating at the goal. Deliberately stricter than
/// the advance threshold: reaching the goal rung is cheap, staying
/// reliable there is what ends the run.
pub const FINAL_SUCCESS_BAR: f64 = 0.95;

/// Bisection-style curriculum over an absolute difficulty in `[1, goal]`.
///
/// Starts at `goal / cut_factor` and runs in two phases:
///
/// - **Undecided** (step size unset): evidence accumulates until the
///   transcript holds a full `max_window`, then the target-rate test
///   either locks the step size `inc` to the current rung or halves the
///   rung (`/ cut_factor`, floored at 1). Either way the evidence is
///   spent.
/// - **Decided**: once the transcript exceeds `min_window`, clearing the
///   advance threshold moves the rung up by the locked `inc` (clamped to
///   the goal); failing the low threshold halves both the rung and `inc`.
///
/// Done when the rung sits at the goal and the held-out success
/// probability clears [`FINAL_SUCCESS_BAR`].
#[derive(Debug, Clone)]
pub struct AdaptiveTeacher {
    rung: usize,
    goal: usize,
    inc: Option<usize>,
    cut_factor: usize,
    target_rate: f64,
    threshold: f64,
    threshold_low: f64,
    evidence: EvidenceSpec,
    steps: usize,
    done: bool,
}

impl AdaptiveTeacher {
    /// Teacher toward an absolute difficulty of `goal`, with the default
    /// parameters: target rate 0.5, thresholds 0.8/0.2, confidence 0.95,
    /// cut factor 2.
    pub fn new(goal: usize) -> Result<Self> {
        if goal == 0 {
            return Err(EnsenarError::invalid("goal", "must be at least 1"));
        }
        let cut_factor = 2;
        let threshold = 0.8;
        Ok(Self {
            rung: (goal / cut_factor).max(1),
            goal,
            inc: None,
            cut_factor,
            target_rate: 0.5,
            threshold,
            threshold_low: 0.2,
            evidence: EvidenceSpec::derive(threshold, 0.95)?,
            steps: DEFAULT_CHECKPOINT_STEPS,
            done: false,
        })
    }

    /// Set advance/retreat thresholds and the confidence level; the
    /// evidence windows re-derive from `(threshold, confidence)`.
    pub fn with_thresholds(
        mut self,
        threshold: f64,
        threshold_low: f64,
        confidence: f64,
    ) -> Result<Self> {
        self.evidence = EvidenceSpec::derive(threshold, confidence)?;
        self.threshold = threshold;
        self.threshold_low = threshold_low;
        Ok(self)
    }

    /// Set the target rate of the undecided-phase lock-in test.
    pub fn with_target_rate(mut self, target_rate: f64) -> Self {
        self.target_rate = target_rate;
        self
    }

    /// Set the divisor applied on retreats.
    pub fn with_cut_factor(mut self, cut_factor: usize) -> Result<Self> {
        if cut_factor < 2 {
            return Err(EnsenarError::invalid("cut_factor", "must be at least 2"));
        }
        self.cut_factor = cut_factor;
        self.rung = (self.goal / cut_factor).max(1);
        Ok(self)
    }

    /// Set the per-checkpoint training duration.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Current absolute difficulty assignment.
    pub fn rung(&self) -> usize {
        self.rung
    }

    /// Locked advance step size, once the undecided phase has resolved.
    pub fn quantum(&self) -> Option<usize> {
        self.inc
    }
}

impl Teacher for AdaptiveTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        if self.done {
            return None;
        }
        Some(Checkpoint { rung: self.rung, steps: self.steps })
    }

    fn update(&mut self, transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision {
        match self.inc {
            Some(inc) => {
                if transcripts.at(self.rung).len() > self.evidence.min_window {
                    let advance = self
                        .evidence
                        .confident_above_at(transcripts.at(self.rung), self.threshold);
                    let retreat = !advance
                        && self.evidence.confident_below_at(
                            transcripts.at(self.rung),
                            1.0 - self.threshold_low,
                        );
                    if advance {
                        transcripts.clear_rung(self.rung);
                        self.rung = (self.rung + inc).min(self.goal);
                    } else if retreat {
                        transcripts.clear_rung(self.rung);
                        self.rung = (self.rung / self.cut_factor).max(1);
                        self.inc = Some((inc / self.cut_factor).max(1));
                    }
                }
            }
            None => {
                let tested = self.rung;
                if transcripts.at(tested).len() >= self.evidence.max_window {
                    if self
                        .evidence
                        .confident_above_at(transcripts.at(tested), self.target_rate)
                    {
                        self.inc = Some(tested);
                    } else {
                        self.rung = (tested / self.cut_factor).max(1);
                    }
                    transcripts.clear_rung(tested);
                }
            }
        }

        if self.rung == self.goal && last.success_prob > FINAL_SUCCESS_BAR {
            self.done = true;
            return Decision::Done;
        }
        Decision::Continue
    }

    fn name(&self) -> &str {
        "adaptive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(rung: usize, success_prob: f64) -> TrajectoryPoint {
        TrajectoryPoint { rung, success_prob }
    }

    fn streak(value: bool, len: usize) -> Vec<bool> {
        vec![value; len]
    }

    #[test]
    fn test_starts_at_goal_over_cut_factor() {
        assert_eq!(AdaptiveTeacher::new(8).unwrap().rung(), 4);
        assert_eq!(AdaptiveTeacher::new(10).unwrap().rung(), 5);
        // Degenerate goals still start at a trainable difficulty
        assert_eq!(AdaptiveTeacher::new(1).unwrap().rung(), 1);
    }

    #[test]
    fn test_lock_in_captures_rung_as_quantum() {
        let mut t = AdaptiveTeacher::new(8).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;

        transcripts.append(4, streak(true, max));
        t.update(&mut transcripts, point(4, 0.5));

        assert_eq!(t.quantum(), Some(4));
        assert_eq!(t.rung(), 4, "lock-in itself does not move the rung");
        assert!(transcripts.at(4).is_empty(), "lock-in spends the evidence");
    }

    #[test]
    fn test_undecided_retreat_halves_and_clears() {
        let mut t = AdaptiveTeacher::new(8).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;

        // Mixed evidence never clears a 0.95-confidence test at rate 0.5
        let mixed: Vec<bool> = (0..max).map(|i| i % 2 == 0).collect();
        transcripts.append(4, mixed);
        t.update(&mut transcripts, point(4, 0.5));

        assert_eq!(t.quantum(), None);
        assert_eq!(t.rung(), 2);
        assert!(transcripts.at(4).is_empty());
    }

    #[test]
    fn test_undecided_waits_for_full_window() {
        let mut t = AdaptiveTeacher::new(8).unwrap();
        let mut transcripts = TranscriptMap::new();

        transcripts.append(4, streak(true, t.evidence.max_window - 1));
        t.update(&mut transcripts, point(4, 0.5));

        assert_eq!(t.quantum(), None);
        assert_eq!(t.rung(), 4);
        assert!(!transcripts.at(4).is_empty());
    }

    #[test]
    fn test_advances_by_exactly_the_locked_quantum() {
        let mut t = AdaptiveTeacher::new(20).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;
        let min = t.evidence.min_window;
        assert_eq!(t.rung(), 10);

        transcripts.append(10, streak(true, max));
        t.update(&mut transcripts, point(10, 0.5));
        assert_eq!(t.quantum(), Some(10));

        transcripts.append(10, streak(true, min + 1));
        t.update(&mut transcripts, point(10, 0.5));
        assert_eq!(t.rung(), 20, "10 + quantum 10, clamped to goal");
        assert_eq!(t.quantum(), Some(10), "the quantum itself does not move");
    }

    #[test]
    fn test_post_lock_retreat_halves_rung_and_quantum() {
        let mut t = AdaptiveTeacher::new(8).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;
        let min = t.evidence.min_window;

        transcripts.append(4, streak(true, max));
        t.update(&mut transcripts, point(4, 0.5));
        assert_eq!(t.quantum(), Some(4));

        transcripts.append(4, streak(false, min + 1));
        t.update(&mut transcripts, point(4, 0.1));

        assert_eq!(t.rung(), 2);
        assert_eq!(t.quantum(), Some(2));
        assert!(transcripts.at(4).is_empty());
    }

    #[test]
    fn test_quantum_never_retreats_below_one() {
        let mut t = AdaptiveTeacher::new(4).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;
        let min = t.evidence.min_window;
        assert_eq!(t.rung(), 2);

        transcripts.append(2, streak(true, max));
        t.update(&mut transcripts, point(2, 0.5));
        assert_eq!(t.quantum(), Some(2));

        for _ in 0..3 {
            let rung = t.rung();
            transcripts.append(rung, streak(false, min + 1));
            t.update(&mut transcripts, point(rung, 0.0));
        }
        assert_eq!(t.rung(), 1);
        assert_eq!(t.quantum(), Some(1), "step size floors at 1 rather than stalling");
    }

    #[test]
    fn test_done_requires_goal_and_strict_bar() {
        let mut t = AdaptiveTeacher::new(8).unwrap();
        let mut transcripts = TranscriptMap::new();
        let max = t.evidence.max_window;
        let min = t.evidence.min_window;

        transcripts.append(4, streak(true, max));
        t.update(&mut transcripts, point(4, 0.99));
        assert!(!matches!(
            t.update(&mut transcripts, point(4, 0.99)),
            Decision::Done
        ));

        transcripts.append(4, streak(true, min + 1));
        t.update(&mut transcripts, point(4, 0.5));
        assert_eq!(t.rung(), 8);

        assert_eq!(t.update(&mut transcripts, point(8, 0.95)), Decision::Continue);
        assert_eq!(t.update(&mut transcripts, point(8, 0.96)), Decision::Done);
        assert!(t.next_checkpoint().is_none());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(AdaptiveTeacher::new(0).is_err());
        assert!(AdaptiveTeacher::new(8).unwrap().with_cut_factor(1).is_err());
        assert!(AdaptiveTeacher::new(8)
            .unwrap()
            .with_thresholds(1.5, 0.2, 0.95)
            .is_err());
    }
}
