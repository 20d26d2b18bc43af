//! Binary chain task: advance to the end or halt

use super::{Environment, Step};

/// Action repertoire of the chain task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    /// End the episode where it stands
    Halt,
    /// Move one position toward the goal
    Advance,
}

/// A length-N chain. The agent starts at position 0 and either advances or
/// halts; reaching position N ends the episode with the terminal reward,
/// halting (or never arriving) ends it with nothing. The chain length is
/// the difficulty parameter the curriculum schedules.
///
/// # Example
///
/// ```
/// use ensenar::env::{BinaryChainEnv, ChainAction, Environment};
///
/// let mut env = BinaryChainEnv::new(3);
/// env.reset();
/// for _ in 0..2 {
///     assert!(!env.step(ChainAction::Advance).done);
/// }
/// let last = env.step(ChainAction::Advance);
/// assert!(last.done && last.success);
/// assert_eq!(env.history(), &[true]);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryChainEnv {
    length: usize,
    reward: f64,
    loc: usize,
    history: Vec<bool>,
}

impl BinaryChainEnv {
    /// Chain of `length` positions with a unit terminal reward.
    pub fn new(length: usize) -> Self {
        Self::with_reward(length, 1.0)
    }

    /// Chain with an explicit terminal reward.
    pub fn with_reward(length: usize, reward: f64) -> Self {
        Self { length, reward, loc: 0, history: Vec::new() }
    }

    /// Difficulty parameter of this instance.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Environment for BinaryChainEnv {
    type Obs = usize;
    type Action = ChainAction;

    fn reset(&mut self) -> usize {
        self.loc = 0;
        self.loc
    }

    fn step(&mut self, action: ChainAction) -> Step<usize> {
        let halted = matches!(action, ChainAction::Halt);
        if !halted {
            self.loc += 1;
        }

        let success = self.loc >= self.length;
        let done = halted || success;
        let reward = if success { self.reward } else { 0.0 };
        if done {
            self.history.push(success);
        }

        Step { obs: self.loc, reward, done, success }
    }

    fn history(&self) -> &[bool] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_to_goal_succeeds() {
        let mut env = BinaryChainEnv::new(4);
        env.reset();
        let mut last = None;
        for _ in 0..4 {
            last = Some(env.step(ChainAction::Advance));
        }
        let last = last.unwrap();
        assert!(last.done);
        assert!(last.success);
        assert_eq!(last.reward, 1.0);
        assert_eq!(last.obs, 4);
    }

    #[test]
    fn test_halt_fails() {
        let mut env = BinaryChainEnv::new(4);
        env.reset();
        env.step(ChainAction::Advance);
        let halted = env.step(ChainAction::Halt);
        assert!(halted.done);
        assert!(!halted.success);
        assert_eq!(halted.reward, 0.0);
        assert_eq!(halted.obs, 1);
    }

    #[test]
    fn test_history_records_each_episode() {
        let mut env = BinaryChainEnv::new(2);

        env.reset();
        env.step(ChainAction::Advance);
        env.step(ChainAction::Advance);

        env.reset();
        env.step(ChainAction::Halt);

        assert_eq!(env.history(), &[true, false]);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut env = BinaryChainEnv::new(3);
        env.reset();
        env.step(ChainAction::Advance);
        assert_eq!(env.reset(), 0);
    }
}
