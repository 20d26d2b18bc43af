//! Checkpoint controller driving teacher, student, and environments

use serde::{Deserialize, Serialize};

use crate::curriculum::{
    interleave, Checkpoint, Decision, Schedule, Teacher, TrajectoryPoint, TranscriptMap,
};
use crate::env::Environment;
use crate::error::{EnsenarError, Result};
use crate::student::Student;

use super::sink::{RecordSink, ScalarKey, ScalarRecord};

/// Deterministic evaluation episodes per checkpoint.
pub const DEFAULT_EVAL_EPISODES: usize = 25;

/// Run-level knobs, independent of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Deterministic evaluation episodes per round
    pub eval_episodes: usize,
    /// Training sub-environments per round; their episode histories are
    /// interleaved round-robin when merged into the transcript
    pub parallel_envs: usize,
    /// Hard cap on rounds; the run stops here even if the policy never
    /// reaches its stopping condition
    pub max_rounds: usize,
    /// Seed recorded in the report; environment and student factories
    /// derive their private streams from it
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            eval_episodes: DEFAULT_EVAL_EPISODES,
            parallel_envs: 1,
            max_rounds: 100,
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Config with the given round cap and defaults elsewhere.
    pub fn new(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            ..Self::default()
        }
    }

    /// Set the number of evaluation episodes.
    pub fn with_eval_episodes(mut self, eval_episodes: usize) -> Self {
        self.eval_episodes = eval_episodes;
        self
    }

    /// Set the number of parallel training sub-environments.
    pub fn with_parallel_envs(mut self, parallel_envs: usize) -> Self {
        self.parallel_envs = parallel_envs;
        self
    }

    /// Set the run seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.eval_episodes == 0 {
            return Err(EnsenarError::invalid("eval_episodes", "must be at least 1"));
        }
        if self.parallel_envs == 0 {
            return Err(EnsenarError::invalid("parallel_envs", "must be at least 1"));
        }
        if self.max_rounds == 0 {
            return Err(EnsenarError::invalid("max_rounds", "must be at least 1"));
        }
        Ok(())
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Policy signalled the goal was reached
    Completed,
    /// Policy stopped emitting checkpoints (manual plan consumed, or
    /// already finished)
    Exhausted,
    /// Hard round cap hit before the policy finished
    RoundLimit,
}

/// Summary of one finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunReport {
    /// How the run ended
    pub outcome: RunOutcome,
    /// Rounds completed
    pub rounds: usize,
    /// Seed the run was configured with
    pub seed: u64,
    /// Last trajectory entry, if any round completed
    pub final_point: Option<TrajectoryPoint>,
}

/// Drives training rounds until the policy finishes or a cap is hit.
///
/// Per round: request a checkpoint from the policy, train the student on
/// fresh environments at the checkpoint's rung, evaluate on the held-out
/// environment, append to the trajectory, merge the round's episode
/// outcomes into the per-rung transcript, then let the policy decide.
///
/// # Example
///
/// ```
/// use ensenar::curriculum::{IncrementalTeacher, Schedule};
/// use ensenar::env::BinaryChainEnv;
/// use ensenar::run::{CheckpointRunner, RunConfig};
/// use ensenar::student::TabularStudent;
///
/// # fn main() -> ensenar::Result<()> {
/// let schedule = Schedule::from_fn(3, |rung| rung + 1)?;
/// let teacher = IncrementalTeacher::new(schedule.len())?.with_steps(400);
/// let mut runner = CheckpointRunner::new(teacher, RunConfig::new(40))?;
/// let mut student = TabularStudent::new(7).with_bonus(1.0);
/// let mut eval_env = BinaryChainEnv::new(3);
/// let report = runner.run(&mut student, &schedule, &mut eval_env, None, |len| {
///     BinaryChainEnv::new(*len)
/// })?;
/// assert!(report.rounds <= 40);
/// # Ok(())
/// # }
/// ```
pub struct CheckpointRunner<T: Teacher> {
    teacher: T,
    config: RunConfig,
    transcripts: TranscriptMap,
    trajectory: Vec<TrajectoryPoint>,
    sinks: Vec<Box<dyn RecordSink>>,
}

impl<T: Teacher> CheckpointRunner<T> {
    /// Pair a policy with run-level configuration.
    pub fn new(teacher: T, config: RunConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            teacher,
            config,
            transcripts: TranscriptMap::new(),
            trajectory: Vec::new(),
            sinks: Vec::new(),
        })
    }

    /// Attach a record sink.
    pub fn add_sink<K: RecordSink + 'static>(&mut self, sink: K) {
        self.sinks.push(Box::new(sink));
    }

    /// Trajectory accumulated so far, one entry per completed round.
    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        &self.trajectory
    }

    /// Per-rung outcome transcripts as the policy last left them.
    pub fn transcripts(&self) -> &TranscriptMap {
        &self.transcripts
    }

    /// The policy, for post-run inspection.
    pub fn teacher(&self) -> &T {
        &self.teacher
    }

    /// Drive rounds to completion.
    ///
    /// `schedule` maps each assigned rung to its difficulty parameters
    /// and `make_env` builds a fresh training environment from them;
    /// `eval_env` is the persistent held-out instance at the goal
    /// difficulty; `confirm_env` is the independent target instance
    /// policies with a confirmation step test against. A policy that
    /// requests confirmation without one attached halts the run with
    /// [`EnsenarError::MissingConfirmEnv`].
    pub fn run<S, E, D, F>(
        &mut self,
        student: &mut S,
        schedule: &Schedule<D>,
        eval_env: &mut E,
        confirm_env: Option<&mut E>,
        mut make_env: F,
    ) -> Result<RunReport>
    where
        S: Student<Obs = E::Obs, Action = E::Action>,
        E: Environment,
        F: FnMut(&D) -> E,
    {
        let mut confirm_env = confirm_env;
        let mut rounds = 0;

        let outcome = loop {
            if rounds >= self.config.max_rounds {
                break RunOutcome::RoundLimit;
            }
            let Some(checkpoint) = self.teacher.next_checkpoint() else {
                break RunOutcome::Exhausted;
            };

            let round_outcomes = self.train_round(student, schedule, &checkpoint, &mut make_env);
            let success_prob = estimate_success(student, eval_env, self.config.eval_episodes);

            let point = TrajectoryPoint {
                rung: checkpoint.rung,
                success_prob,
            };
            self.trajectory.push(point);
            self.transcripts.append(checkpoint.rung, round_outcomes);
            self.emit(rounds, point);
            rounds += 1;

            match self.teacher.update(&mut self.transcripts, point) {
                Decision::Continue => {}
                Decision::Confirm => {
                    let confirmed = match confirm_env {
                        Some(ref mut env) => {
                            estimate_success(student, &mut **env, self.config.eval_episodes)
                        }
                        None => {
                            return Err(EnsenarError::MissingConfirmEnv(
                                self.teacher.name().to_string(),
                            ))
                        }
                    };
                    if self.teacher.confirm(confirmed) == Decision::Done {
                        break RunOutcome::Completed;
                    }
                }
                Decision::Done => break RunOutcome::Completed,
            }
        };

        for sink in &mut self.sinks {
            sink.finish();
        }
        Ok(RunReport {
            outcome,
            rounds,
            seed: self.config.seed,
            final_point: self.trajectory.last().copied(),
        })
    }

    /// Train one checkpoint and collect the episode outcomes in the
    /// order a vectorized environment would have produced them.
    fn train_round<S, E, D, F>(
        &self,
        student: &mut S,
        schedule: &Schedule<D>,
        checkpoint: &Checkpoint,
        make_env: &mut F,
    ) -> Vec<bool>
    where
        S: Student<Obs = E::Obs, Action = E::Action>,
        E: Environment,
        F: FnMut(&D) -> E,
    {
        let per_env = (checkpoint.steps / self.config.parallel_envs).max(1);
        let mut histories = Vec::with_capacity(self.config.parallel_envs);
        for _ in 0..self.config.parallel_envs {
            let mut env = make_env(schedule.params(checkpoint.rung));
            student.learn(&mut env, per_env, |_episode, _reward| {});
            histories.push(env.history().to_vec());
        }
        let views: Vec<&[bool]> = histories.iter().map(Vec::as_slice).collect();
        interleave(&views)
    }

    fn emit(&mut self, round: usize, point: TrajectoryPoint) {
        for sink in &mut self.sinks {
            sink.record(ScalarRecord {
                round,
                key: ScalarKey::DifficultyIndex,
                value: point.rung as f64,
            });
            sink.record(ScalarRecord {
                round,
                key: ScalarKey::SuccessProbability,
                value: point.success_prob,
            });
        }
    }
}

/// Fraction of deterministic episodes on `env` that end in success.
/// Zero requested episodes reads as 0.0.
pub fn estimate_success<S, E>(student: &mut S, env: &mut E, episodes: usize) -> f64
where
    S: Student<Obs = E::Obs, Action = E::Action>,
    E: Environment,
{
    if episodes == 0 {
        return 0.0;
    }
    let mut successes = 0;
    for _ in 0..episodes {
        let mut obs = env.reset();
        loop {
            let action = student.predict(&obs, true);
            let step = env.step(action);
            if step.done {
                if step.success {
                    successes += 1;
                }
                break;
            }
            obs = step.obs;
        }
    }
    successes as f64 / episodes as f64
}
