//! Sequential Bayesian evidence tests for curriculum decisions
//!
//! Success/failure transcripts are treated as Bernoulli trials with a
//! uniform prior: `s` successes in `n` trials give a Beta(s+1, n-s+1)
//! posterior over the true success rate, and the tail mass above a target
//! rate is the confidence that the student has mastered (or lost) a rung.
//! Decisions read the posterior over sliding windows so they react quickly
//! without trusting tiny samples.

mod beta;
mod evidence;

pub use beta::{beta_cdf, incomplete_beta, ln_gamma};
pub use evidence::{
    prob_exceeds_threshold, EvidenceSpec, DEFAULT_MAX_WINDOW_FACTOR, DEFAULT_MIN_WINDOW_FLOOR,
};
