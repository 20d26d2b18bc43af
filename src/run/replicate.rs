//! Statistical replication across independent trials

use serde::Serialize;

use crate::error::{EnsenarError, Result};

use super::runner::{RunOutcome, RunReport};

/// Aggregate of `trials` independent runs of one configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationReport {
    /// Per-trial reports, in seed order
    pub reports: Vec<RunReport>,
    /// Mean rounds per trial
    pub mean_rounds: f64,
    /// Sample standard deviation of rounds (n-1 denominator)
    pub std_rounds: f64,
    /// Trials that ended in [`RunOutcome::Completed`]
    pub completed: usize,
}

impl ReplicationReport {
    /// Fraction of trials that completed.
    pub fn completion_rate(&self) -> f64 {
        self.completed as f64 / self.reports.len() as f64
    }

    /// Format as ASCII table.
    pub fn to_table(&self) -> String {
        let mut output = String::from("Replication Results\n");
        output.push_str("┌───────┬────────────┬────────────┬────────────┐\n");
        output.push_str("│ Trial │ Seed       │ Rounds     │ Outcome    │\n");
        output.push_str("├───────┼────────────┼────────────┼────────────┤\n");
        for (trial, report) in self.reports.iter().enumerate() {
            output.push_str(&format!(
                "│ {:>5} │ {:>10} │ {:>10} │ {:>10} │\n",
                trial,
                report.seed,
                report.rounds,
                match report.outcome {
                    RunOutcome::Completed => "completed",
                    RunOutcome::Exhausted => "exhausted",
                    RunOutcome::RoundLimit => "round cap",
                }
            ));
        }
        output.push_str("└───────┴────────────┴────────────┴────────────┘\n");
        output.push_str(&format!(
            "\nRounds: {:.1} ± {:.1} over {} trials ({:.0}% completed)\n",
            self.mean_rounds,
            self.std_rounds,
            self.reports.len(),
            self.completion_rate() * 100.0
        ));
        output
    }
}

/// Run one configuration `trials` times with seeds `base_seed + t`.
///
/// `run_trial` owns everything per trial: it builds the policy, student,
/// and environments from the seed it is handed and drives one run.
/// Trials execute sequentially; runs share no state, so callers wanting
/// parallelism can dispatch the same closure across threads themselves.
///
/// # Example
///
/// ```
/// use ensenar::run::{replicate, RunOutcome, RunReport};
///
/// # fn main() -> ensenar::Result<()> {
/// let summary = replicate(3, 40, |seed| {
///     Ok(RunReport {
///         outcome: RunOutcome::Completed,
///         rounds: 4 + (seed % 2) as usize,
///         seed,
///         final_point: None,
///     })
/// })?;
/// assert_eq!(summary.reports.len(), 3);
/// assert_eq!(summary.completed, 3);
/// # Ok(())
/// # }
/// ```
pub fn replicate<F>(trials: usize, base_seed: u64, mut run_trial: F) -> Result<ReplicationReport>
where
    F: FnMut(u64) -> Result<RunReport>,
{
    if trials == 0 {
        return Err(EnsenarError::invalid("trials", "must be at least 1"));
    }

    let mut reports = Vec::with_capacity(trials);
    for trial in 0..trials {
        reports.push(run_trial(base_seed + trial as u64)?);
    }

    let rounds: Vec<f64> = reports.iter().map(|r| r.rounds as f64).collect();
    let mean_rounds = rounds.iter().sum::<f64>() / rounds.len() as f64;
    let completed = reports
        .iter()
        .filter(|r| r.outcome == RunOutcome::Completed)
        .count();

    Ok(ReplicationReport {
        std_rounds: std_dev(&rounds),
        reports,
        mean_rounds,
        completed,
    })
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
