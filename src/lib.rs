//! Automatic curriculum generation for a reinforcement-learning student.
//!
//! This crate provides tools for:
//! - Bayesian confidence bounds on Bernoulli success rates
//! - Interchangeable curriculum policies over a difficulty ladder
//! - A checkpoint controller wiring teacher, student, and environments
//! - Replication of whole runs across seeds for statistical comparison
//!
//! A *teacher* policy picks the difficulty rung for each training round.
//! After the round it sees the per-rung success transcript and the
//! held-out success probability, runs a sequential hypothesis test on
//! the transcript, and decides whether to advance, retreat, hold, or
//! stop. The aim is to reach a target difficulty in as few rounds as a
//! hand-tuned schedule would, without the hand-tuning.

pub mod curriculum;
pub mod env;
pub mod error;
pub mod run;
pub mod stats;
pub mod student;

pub use curriculum::{Checkpoint, Decision, Teacher, TrajectoryPoint};
pub use error::{EnsenarError, Result};
pub use run::{replicate, CheckpointRunner, RunConfig, RunOutcome, RunReport};
pub use stats::{prob_exceeds_threshold, EvidenceSpec};

/// Train a tabular student up a binary-chain curriculum.
///
/// Convenience entry point: incremental policy, chain environments of
/// length `rung + 1`, held-out evaluation at the goal length.
pub fn chain_curriculum(goal: usize, seed: u64, max_rounds: usize) -> Result<RunReport> {
    let schedule = curriculum::Schedule::from_fn(goal, |rung| rung + 1)?;
    let teacher = curriculum::IncrementalTeacher::new(goal)?;
    let config = RunConfig::new(max_rounds).with_seed(seed);
    let mut runner = CheckpointRunner::new(teacher, config)?;
    let mut student = student::TabularStudent::new(seed);
    let mut eval_env = env::BinaryChainEnv::new(goal);
    runner.run(&mut student, &schedule, &mut eval_env, None, |len| {
        env::BinaryChainEnv::new(*len)
    })
}
