//! Selection context for rule evaluation.

use crate::models::{Process, Time};

/// A ready process competing for the CPU at a scheduling point.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Canonical position in the [`ProcessSet`](crate::models::ProcessSet).
    pub index: usize,
    /// The process itself.
    pub process: &'a Process,
    /// CPU time still needed.
    pub remaining: Time,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(index: usize, process: &'a Process, remaining: Time) -> Self {
        Self {
            index,
            process,
            remaining,
        }
    }

    /// Creates a candidate that has not run yet.
    pub fn fresh(index: usize, process: &'a Process) -> Self {
        Self::new(index, process, process.burst)
    }
}

/// Simulation state visible to selection rules.
///
/// Built per scheduling point and discarded afterwards; rules never
/// see mutable scheduler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulated time.
    pub current_time: Time,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: Time) -> Self {
        Self { current_time }
    }

    /// Time a candidate has spent waiting since arrival.
    pub fn waited(&self, candidate: &Candidate<'_>) -> Time {
        (self.current_time - candidate.process.arrival).max(0)
    }
}
