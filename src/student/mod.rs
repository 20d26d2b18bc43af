//! The student contract and a tabular reference student
//!
//! The curriculum machinery treats the learner through two operations
//! only: `predict` maps an observation to an action (greedy or sampled)
//! and `learn` runs training episodes against a supplied environment
//! under a step budget, reporting each completed episode through a
//! callback. Nothing else about the learner is visible; value tables and
//! update rules stay behind the trait.

mod tabular;

pub use tabular::TabularStudent;

use crate::env::Environment;

/// Contract between the curriculum machinery and a learner.
pub trait Student {
    type Obs;
    type Action;

    /// Choose an action. Deterministic mode is used for held-out
    /// evaluation; sampled mode drives exploration during training.
    fn predict(&mut self, obs: &Self::Obs, deterministic: bool) -> Self::Action;

    /// Train against `env` for at most `max_steps` environment steps,
    /// invoking `on_episode(episode_index, final_reward)` after each
    /// completed episode.
    fn learn<E, F>(&mut self, env: &mut E, max_steps: usize, on_episode: F)
    where
        E: Environment<Obs = Self::Obs, Action = Self::Action>,
        F: FnMut(usize, f64);
}
