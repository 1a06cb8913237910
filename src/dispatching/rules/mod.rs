//! Built-in selection rules.
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{Candidate, RuleScore, SchedulingContext, SelectionRule};
use crate::config::PriorityOrder;

/// First In First Out.
///
/// Earlier arrival runs first.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl SelectionRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SchedulingContext) -> RuleScore {
        candidate.process.arrival
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest Remaining Time.
///
/// For a process that has not run yet this is its burst, so the same rule
/// drives both SJF and SRTF.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SchedulingContext) -> RuleScore {
        candidate.remaining
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Process priority, in the configured direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority {
    /// Which end of the scale wins.
    pub order: PriorityOrder,
}

impl Priority {
    /// Creates the rule for a priority direction.
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }
}

impl SelectionRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SchedulingContext) -> RuleScore {
        match self.order {
            PriorityOrder::LowerIsHigher => candidate.process.priority,
            PriorityOrder::HigherIsHigher => -candidate.process.priority,
        }
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}

/// Input order.
///
/// Unique per process, so it always resolves remaining ties.
#[derive(Debug, Clone, Copy)]
pub struct InputOrder;

impl SelectionRule for InputOrder {
    fn name(&self) -> &'static str {
        "INPUT"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SchedulingContext) -> RuleScore {
        candidate.process.input_index as RuleScore
    }

    fn description(&self) -> &'static str {
        "Original Input Order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_fifo() {
        let ctx = SchedulingContext::at_time(10);
        let early = Process::new("early", 1, 5);
        let late = Process::new("late", 4, 1);
        assert!(
            Fifo.evaluate(&Candidate::fresh(0, &early), &ctx)
                < Fifo.evaluate(&Candidate::fresh(1, &late), &ctx)
        );
    }

    #[test]
    fn test_shortest_remaining_uses_remaining_not_burst() {
        let ctx = SchedulingContext::at_time(0);
        let a = Process::new("a", 0, 10);
        let b = Process::new("b", 0, 4);
        // a has run for 8 of its 10 units
        let partly_done = Candidate::new(0, &a, 2);
        let fresh = Candidate::fresh(1, &b);
        assert!(
            ShortestRemaining.evaluate(&partly_done, &ctx)
                < ShortestRemaining.evaluate(&fresh, &ctx)
        );
    }

    #[test]
    fn test_priority_directions() {
        let ctx = SchedulingContext::at_time(0);
        let one = Process::new("one", 0, 1).with_priority(1);
        let five = Process::new("five", 0, 1).with_priority(5);
        let c1 = Candidate::fresh(0, &one);
        let c5 = Candidate::fresh(1, &five);

        let lower = Priority::new(PriorityOrder::LowerIsHigher);
        assert!(lower.evaluate(&c1, &ctx) < lower.evaluate(&c5, &ctx));

        let higher = Priority::new(PriorityOrder::HigherIsHigher);
        assert!(higher.evaluate(&c5, &ctx) < higher.evaluate(&c1, &ctx));
    }

    #[test]
    fn test_input_order() {
        let ctx = SchedulingContext::at_time(0);
        let first = Process::new("x", 0, 1).with_input_index(0);
        let second = Process::new("y", 0, 1).with_input_index(3);
        assert!(
            InputOrder.evaluate(&Candidate::fresh(0, &first), &ctx)
                < InputOrder.evaluate(&Candidate::fresh(1, &second), &ctx)
        );
    }

    #[test]
    fn test_waited() {
        let ctx = SchedulingContext::at_time(7);
        let p = Process::new("p", 3, 1);
        assert_eq!(ctx.waited(&Candidate::fresh(0, &p)), 4);
    }
}
