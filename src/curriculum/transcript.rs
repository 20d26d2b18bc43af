//! Per-rung outcome evidence

use std::collections::HashMap;

/// Success/failure evidence per rung, in training order.
///
/// The checkpoint controller appends each round's episode outcomes under
/// the rung that was trained; policies read the evidence during their
/// update and clear a rung once a decision has spent it. An index that
/// was never trained (or was cleared) reads as an empty transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptMap {
    by_rung: HashMap<usize, Vec<bool>>,
}

impl TranscriptMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append outcomes to a rung's transcript, preserving order.
    pub fn append(&mut self, rung: usize, outcomes: impl IntoIterator<Item = bool>) {
        self.by_rung.entry(rung).or_default().extend(outcomes);
    }

    /// The transcript at `rung`; empty if the rung holds no evidence.
    pub fn at(&self, rung: usize) -> &[bool] {
        self.by_rung.get(&rung).map_or(&[], |v| v.as_slice())
    }

    /// Drop exactly one rung's evidence, leaving every other rung intact.
    pub fn clear_rung(&mut self, rung: usize) {
        self.by_rung.remove(&rung);
    }

    /// Rungs currently holding evidence, in ascending order.
    pub fn rungs(&self) -> Vec<usize> {
        let mut rungs: Vec<usize> = self.by_rung.keys().copied().collect();
        rungs.sort_unstable();
        rungs
    }
}

/// Round-robin merge of per-subenvironment histories, preserving round
/// order: the first episode of every contributor, then the second of
/// every contributor, and so on, skipping contributors that ran fewer
/// episodes.
pub fn interleave(histories: &[&[bool]]) -> Vec<bool> {
    let longest = histories.iter().map(|h| h.len()).max().unwrap_or(0);
    let mut merged = Vec::new();
    for i in 0..longest {
        for h in histories {
            if let Some(&outcome) = h.get(i) {
                merged.push(outcome);
            }
        }
    }
    merged
}
