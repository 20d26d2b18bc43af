//! Windowed Bayesian confidence tests over binary outcome transcripts

use serde::{Deserialize, Serialize};

use super::beta::beta_cdf;
use crate::error::{EnsenarError, Result};

/// Default absolute floor for the derived minimum window length.
pub const DEFAULT_MIN_WINDOW_FLOOR: usize = 5;
/// Default multiplier taking the minimum window to the maximum window.
pub const DEFAULT_MAX_WINDOW_FACTOR: usize = 3;

/// Posterior probability that the true success rate exceeds `threshold`.
///
/// Treats `outcomes` as Bernoulli trials under a uniform prior: with `s`
/// successes in `n` trials the posterior over the rate is Beta(s+1, n-s+1),
/// and the answer is `1 - BetaCDF(threshold; s+1, n-s+1)`.
///
/// An empty transcript yields the prior-only answer `1 - threshold`.
pub fn prob_exceeds_threshold(outcomes: &[bool], threshold: f64) -> f64 {
    let n = outcomes.len() as f64;
    let s = outcomes.iter().filter(|&&o| o).count() as f64;
    1.0 - beta_cdf(threshold, s + 1.0, n - s + 1.0)
}

/// Parameters of a sequential evidence test: target rate, required
/// confidence, and the window bounds derived from them.
///
/// `min_window` is the smallest `m` such that `m` consecutive successes
/// reach `confidence` that the true rate exceeds `target_rate` (an
/// all-success run has posterior Beta(m+1, 1), so the tail mass at the
/// target is `1 - target_rate^(m+1)`), floored at an absolute minimum so
/// tiny samples never decide. `max_window` caps how far back evidence is
/// considered.
///
/// # Example
///
/// ```
/// use ensenar::stats::EvidenceSpec;
///
/// let spec = EvidenceSpec::derive(0.95, 0.75).unwrap();
/// assert_eq!(spec.min_window, 27);
/// assert_eq!(spec.max_window, 81);
///
/// let streak = vec![true; spec.min_window];
/// assert!(spec.confident_above(&streak));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSpec {
    /// Success rate the test compares against (τ)
    pub target_rate: f64,
    /// Posterior mass required before the test fires
    pub confidence: f64,
    /// Shortest window length considered
    pub min_window: usize,
    /// Longest window length considered
    pub max_window: usize,
}

impl EvidenceSpec {
    /// Derive window bounds from `(target_rate, confidence)` with the
    /// default floor and factor.
    pub fn derive(target_rate: f64, confidence: f64) -> Result<Self> {
        Self::derive_with(
            target_rate,
            confidence,
            DEFAULT_MIN_WINDOW_FLOOR,
            DEFAULT_MAX_WINDOW_FACTOR,
        )
    }

    /// Derive window bounds with an explicit absolute floor and max-window
    /// factor.
    pub fn derive_with(
        target_rate: f64,
        confidence: f64,
        min_window_floor: usize,
        max_window_factor: usize,
    ) -> Result<Self> {
        if !(target_rate > 0.0 && target_rate < 1.0) {
            return Err(EnsenarError::invalid(
                "target_rate",
                format!("must lie in (0, 1), got {target_rate}"),
            ));
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(EnsenarError::invalid(
                "confidence",
                format!("must lie in (0, 1), got {confidence}"),
            ));
        }
        if min_window_floor == 0 {
            return Err(EnsenarError::invalid("min_window_floor", "must be at least 1"));
        }
        if max_window_factor == 0 {
            return Err(EnsenarError::invalid("max_window_factor", "must be at least 1"));
        }

        // Smallest m with 1 - target_rate^(m+1) >= confidence.
        let raw = (1.0 - confidence).ln() / target_rate.ln() - 1.0;
        let min_window = (raw.ceil().max(0.0) as usize).max(min_window_floor);
        let max_window = min_window * max_window_factor;

        Ok(Self { target_rate, confidence, min_window, max_window })
    }

    /// Whether the evidence shows the success rate exceeds `target_rate`.
    pub fn confident_above(&self, outcomes: &[bool]) -> bool {
        self.confident_above_at(outcomes, self.target_rate)
    }

    /// Whether the evidence shows the success rate exceeds `threshold`.
    ///
    /// Tries window lengths from `min_window` up to `min(max_window, n)`
    /// over the most recent outcomes and fires on the first window whose
    /// posterior tail mass reaches `confidence`. The shortest sufficient
    /// window reacts fastest to a true change; outcomes older than
    /// `max_window` never influence the verdict.
    pub fn confident_above_at(&self, outcomes: &[bool], threshold: f64) -> bool {
        let n = outcomes.len();
        for k in self.min_window..=self.max_window.min(n) {
            if prob_exceeds_threshold(&outcomes[n - k..], threshold) >= self.confidence {
                return true;
            }
        }
        false
    }

    /// Whether the evidence shows the failure rate exceeds `target_rate`
    /// (the complement-transcript test behind dive decisions).
    pub fn confident_below(&self, outcomes: &[bool]) -> bool {
        self.confident_below_at(outcomes, self.target_rate)
    }

    /// Whether the evidence shows the failure rate exceeds `threshold`.
    pub fn confident_below_at(&self, outcomes: &[bool], threshold: f64) -> bool {
        let flipped: Vec<bool> = outcomes.iter().map(|&o| !o).collect();
        self.confident_above_at(&flipped, threshold)
    }
}
