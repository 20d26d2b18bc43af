//! Task environments and the narrow contract the curriculum needs
//!
//! Environments are plain simulators: `reset` starts an episode, `step`
//! advances it and reports reward, termination, and an explicit success
//! flag. Each environment also keeps a per-episode success record behind
//! `history()`, which is the only accessor the checkpoint controller reads
//! back after training — there is no reflective attribute lookup.

mod binary;
mod trail;

pub use binary::{BinaryChainEnv, ChainAction};
pub use trail::{MeanderTrailEnv, TrailAction, TrailParams};

/// One simulator transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    /// Observation after the transition
    pub obs: O,
    /// Reward for the transition
    pub reward: f64,
    /// Whether the episode ended on this transition
    pub done: bool,
    /// Whether the episode ended in success (meaningful when `done`)
    pub success: bool,
}

/// Contract between the curriculum machinery and a task simulator.
///
/// Constructed fresh per difficulty parameterization; the held-out
/// evaluation instance persists across rounds and is only ever `reset`.
pub trait Environment {
    type Obs;
    type Action;

    /// Start a new episode and return the initial observation.
    fn reset(&mut self) -> Self::Obs;

    /// Advance the episode by one action.
    fn step(&mut self, action: Self::Action) -> Step<Self::Obs>;

    /// Success/failure record of every episode completed on this instance,
    /// in completion order.
    fn history(&self) -> &[bool];
}
