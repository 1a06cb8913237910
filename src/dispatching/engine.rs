//! Rule engine for multi-criteria selection.
//!
//! Applies rules in sequence; the next rule is consulted only on ties.
//! Every engine ends with earlier arrival, then earlier input position,
//! so a selection is always unique and deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::{Fifo, InputOrder};
use super::{Candidate, SchedulingContext, SelectionRule};

/// A composable rule engine for ready-set selection.
///
/// # Example
/// ```
/// use cpu_sched::dispatching::{rules, RuleEngine};
/// use cpu_sched::config::PriorityOrder;
///
/// let engine = RuleEngine::new().with_rule(rules::Priority::new(PriorityOrder::LowerIsHigher));
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FIFO", "INPUT"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
}

impl RuleEngine {
    /// Creates an engine with only the arrival/input-order tie-breakers.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule, consulted after the rules already present.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Rule names in evaluation order, tie-breakers included.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|r| r.name())
            .chain([Fifo.name(), InputOrder.name()])
            .collect()
    }

    /// Orders two candidates: `Less` means `a` runs first.
    pub fn compare(
        &self,
        a: &Candidate<'_>,
        b: &Candidate<'_>,
        context: &SchedulingContext,
    ) -> Ordering {
        for rule in &self.rules {
            let ord = rule
                .evaluate(a, context)
                .cmp(&rule.evaluate(b, context));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        // All rules tied → arrival, then input order
        Fifo.evaluate(a, context)
            .cmp(&Fifo.evaluate(b, context))
            .then_with(|| InputOrder.evaluate(a, context).cmp(&InputOrder.evaluate(b, context)))
    }

    /// Returns the position (within `candidates`) of the process to run.
    pub fn select_best(
        &self,
        candidates: &[Candidate<'_>],
        context: &SchedulingContext,
    ) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(a, b, context))
            .map(|(pos, _)| pos)
    }

    /// Positions of `candidates`, best first.
    pub fn sort_indices(
        &self,
        candidates: &[Candidate<'_>],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b], context));
        indices
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
