//! Oscillating probe-and-confirm curriculum

use super::policy::{clamp_rung, Checkpoint, Decision, Teacher, DEFAULT_CHECKPOINT_STEPS};
use super::{TrajectoryPoint, TranscriptMap};
use crate::error::Result;
use crate::stats::EvidenceSpec;

/// Holds a committed rung and oscillates the training assignment between
/// it and the rung below, so a standing estimate of regression is always
/// available without committing to a retreat.
///
/// Per update, testing the transcript at the assigned rung:
///
/// - evidence the success rate exceeds the advance test → **jump**: the
///   committed rung climbs one (clamped to the top) and the assignment
///   follows; the tested rung's evidence is spent and cleared.
/// - evidence the failure rate exceeds the dive test → **dive**: the
///   committed rung drops one (floored at 0), assignment follows,
///   evidence cleared.
/// - neither → hold the committed rung, alternating the assignment
///   between it and the rung below.
///
/// Done when the committed rung is the top of the ladder and the held-out
/// success probability clears the advance target rate.
///
/// The dive test defaults to the advance test on flipped outcomes; give
/// it separate, laxer parameters for hysteresis between climbing and
/// backtracking.
#[derive(Debug, Clone)]
pub struct OscillatingTeacher {
    rung: usize,
    committed: usize,
    top: usize,
    advance_test: EvidenceSpec,
    dive_test: EvidenceSpec,
    steps: usize,
    done: bool,
}

impl OscillatingTeacher {
    /// Teacher over a ladder of `num_rungs` rungs with the default
    /// evidence test (target rate 0.95, confidence 0.75).
    pub fn new(num_rungs: usize) -> Result<Self> {
        Self::with_evidence(num_rungs, EvidenceSpec::derive(0.95, 0.75)?)
    }

    /// Teacher with an explicit advance test; the dive test mirrors it.
    pub fn with_evidence(num_rungs: usize, advance_test: EvidenceSpec) -> Result<Self> {
        if num_rungs == 0 {
            return Err(crate::error::EnsenarError::EmptySchedule);
        }
        Ok(Self {
            rung: 0,
            committed: 0,
            top: num_rungs - 1,
            advance_test,
            dive_test: advance_test,
            steps: DEFAULT_CHECKPOINT_STEPS,
            done: false,
        })
    }

    /// Use a separate evidence test for dive decisions.
    pub fn with_dive_test(mut self, dive_test: EvidenceSpec) -> Self {
        self.dive_test = dive_test;
        self
    }

    /// Set the per-checkpoint training duration.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Current training assignment.
    pub fn rung(&self) -> usize {
        self.rung
    }

    /// Confirmed rung the oscillation is anchored to.
    pub fn committed(&self) -> usize {
        self.committed
    }
}

impl Teacher for OscillatingTeacher {
    fn next_checkpoint(&mut self) -> Option<Checkpoint> {
        if self.done {
            return None;
        }
        Some(Checkpoint { rung: self.rung, steps: self.steps })
    }

    fn update(&mut self, transcripts: &mut TranscriptMap, last: TrajectoryPoint) -> Decision {
        let jump = self.advance_test.confident_above(transcripts.at(self.rung));
        let dive = !jump && self.dive_test.confident_below(transcripts.at(self.rung));

        if jump {
            transcripts.clear_rung(self.rung);
            self.committed = clamp_rung(self.committed + 1, self.top);
            self.rung = self.committed;
        } else if dive {
            transcripts.clear_rung(self.rung);
            self.committed = self.committed.saturating_sub(1);
            self.rung = self.committed;
        } else if self.rung == self.committed {
            // Probe the rung below for regression
            self.rung = self.committed.saturating_sub(1);
        } else {
            self.rung = self.committed;
        }

        if self.committed == self.top && last.success_prob > self.advance_test.target_rate {
            self.done = true;
            return Decision::Done;
        }
        Decision::Continue
    }

    fn name(&self) -> &str {
        "oscillating"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(num_rungs: usize) -> OscillatingTeacher {
        OscillatingTeacher::new(num_rungs).unwrap()
    }

    fn point(rung: usize, success_prob: f64) -> TrajectoryPoint {
        TrajectoryPoint { rung, success_prob }
    }

    fn streak(value: bool, len: usize) -> Vec<bool> {
        vec![value; len]
    }

    #[test]
    fn test_success_streak_jumps_exactly_one() {
        let mut t = teacher(5);
        let mut transcripts = TranscriptMap::new();
        let min = t.advance_test.min_window;
        transcripts.append(0, streak(true, min));

        t.update(&mut transcripts, point(0, 0.5));

        assert_eq!(t.committed(), 1);
        assert_eq!(t.rung(), 1);
        assert!(transcripts.at(0).is_empty(), "spent evidence must be cleared");
    }

    #[test]
    fn test_failure_streak_dives_exactly_one() {
        let mut t = teacher(5);
        let mut transcripts = TranscriptMap::new();
        let min = t.advance_test.min_window;

        // Climb to committed = 2 first
        transcripts.append(0, streak(true, min));
        t.update(&mut transcripts, point(0, 0.5));
        transcripts.append(1, streak(true, min));
        t.update(&mut transcripts, point(1, 0.5));
        assert_eq!(t.committed(), 2);

        transcripts.append(2, streak(false, min));
        t.update(&mut transcripts, point(2, 0.0));

        assert_eq!(t.committed(), 1);
        assert_eq!(t.rung(), 1);
        assert!(transcripts.at(2).is_empty());
    }

    #[test]
    fn test_dive_floors_at_bottom() {
        let mut t = teacher(5);
        let mut transcripts = TranscriptMap::new();
        transcripts.append(0, streak(false, t.dive_test.min_window));

        t.update(&mut transcripts, point(0, 0.0));

        assert_eq!(t.committed(), 0);
        assert_eq!(t.rung(), 0);
    }

    #[test]
    fn test_jump_clamps_at_top() {
        let mut t = teacher(2);
        let mut transcripts = TranscriptMap::new();
        let min = t.advance_test.min_window;

        transcripts.append(0, streak(true, min));
        t.update(&mut transcripts, point(0, 0.5));
        assert_eq!(t.committed(), 1);

        transcripts.append(1, streak(true, min));
        t.update(&mut transcripts, point(1, 0.5));
        assert_eq!(t.committed(), 1, "already at the top rung");
    }

    #[test]
    fn test_undecided_alternates_probe_and_settle() {
        let mut t = teacher(5);
        let mut transcripts = TranscriptMap::new();
        let min = t.advance_test.min_window;

        // Commit to rung 2
        transcripts.append(0, streak(true, min));
        t.update(&mut transcripts, point(0, 0.5));
        transcripts.append(1, streak(true, min));
        t.update(&mut transcripts, point(1, 0.5));
        assert_eq!(t.rung(), 2);

        // No fresh evidence: probe below, then settle back, then probe again
        t.update(&mut transcripts, point(2, 0.5));
        assert_eq!(t.rung(), 1);
        assert_eq!(t.committed(), 2);

        t.update(&mut transcripts, point(1, 0.5));
        assert_eq!(t.rung(), 2);

        t.update(&mut transcripts, point(2, 0.5));
        assert_eq!(t.rung(), 1);
    }

    #[test]
    fn test_done_only_at_top_with_cleared_target() {
        let mut t = teacher(2);
        let mut transcripts = TranscriptMap::new();
        let min = t.advance_test.min_window;

        // High probability below the top rung is not enough
        assert_eq!(t.update(&mut transcripts, point(0, 0.99)), Decision::Continue);

        transcripts.append(0, streak(true, min));
        t.update(&mut transcripts, point(0, 0.5));
        assert_eq!(t.committed(), 1);

        assert_eq!(t.update(&mut transcripts, point(1, 0.9)), Decision::Continue);
        assert_eq!(t.update(&mut transcripts, point(1, 0.96)), Decision::Done);
        assert!(t.next_checkpoint().is_none());
    }

    #[test]
    fn test_separate_dive_test_backtracks_later() {
        // Advance quickly, dive only on overwhelming failure evidence
        let lax_dive = EvidenceSpec::derive(0.99, 0.95).unwrap();
        let mut t = teacher(5).with_dive_test(lax_dive);
        let mut transcripts = TranscriptMap::new();

        // A failure streak long enough for the default dive test but not
        // for the stricter one
        let min_default = t.advance_test.min_window;
        transcripts.append(0, streak(false, min_default));
        t.update(&mut transcripts, point(0, 0.0));
        assert_eq!(t.committed(), 0);
        assert!(
            !transcripts.at(0).is_empty(),
            "undecided hold must not spend evidence"
        );
    }
}
