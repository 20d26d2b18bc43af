//! Ordered difficulty ladders

use crate::error::{EnsenarError, Result};

/// An immutable, ordered ladder of difficulty parameterizations.
///
/// Rung 0 is the easiest task the curriculum will assign and the last
/// rung is the target. Lookups clamp to the ladder bounds so a policy
/// operating in an unbounded index domain still maps to a valid task.
///
/// # Example
///
/// ```
/// use ensenar::curriculum::Schedule;
///
/// let lengths = Schedule::from_fn(5, |rung| rung + 1).unwrap();
/// assert_eq!(lengths.len(), 5);
/// assert_eq!(*lengths.params(2), 3);
/// assert_eq!(*lengths.params(99), 5); // clamped to the top rung
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule<D> {
    rungs: Vec<D>,
}

impl<D> Schedule<D> {
    /// Ladder from an explicit rung list.
    pub fn new(rungs: Vec<D>) -> Result<Self> {
        if rungs.is_empty() {
            return Err(EnsenarError::EmptySchedule);
        }
        Ok(Self { rungs })
    }

    /// Ladder materialized from a closed-form function of the rung index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> D) -> Result<Self> {
        Self::new((0..len).map(f).collect())
    }

    /// Number of rungs.
    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    /// Always false after construction; present for slice-like symmetry.
    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// Index of the hardest rung.
    pub fn top(&self) -> usize {
        self.rungs.len() - 1
    }

    /// Difficulty parameters at `rung`, clamped to the ladder bounds.
    pub fn params(&self, rung: usize) -> &D {
        &self.rungs[rung.min(self.top())]
    }

    /// Iterate the ladder from easiest to hardest.
    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.rungs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_rejected() {
        assert!(Schedule::<usize>::new(Vec::new()).is_err());
        assert!(Schedule::<usize>::from_fn(0, |r| r).is_err());
    }

    #[test]
    fn test_lookup_clamps_to_bounds() {
        let sched = Schedule::new(vec![10, 20, 30]).unwrap();
        assert_eq!(sched.top(), 2);
        assert_eq!(*sched.params(0), 10);
        assert_eq!(*sched.params(2), 30);
        assert_eq!(*sched.params(100), 30);
    }

    #[test]
    fn test_from_fn_materializes_in_order() {
        let sched = Schedule::from_fn(4, |r| r * r).unwrap();
        let rungs: Vec<usize> = sched.iter().copied().collect();
        assert_eq!(rungs, vec![0, 1, 4, 9]);
    }
}
