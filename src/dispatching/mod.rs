//! Candidate selection rules and rule engine.
//!
//! At every scheduling point a strategy hands the ready set to a
//! [`RuleEngine`], which picks one process. Rules are stateless
//! comparators: the engine owns no mutable scheduler state, so any number
//! of simulations can share one.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::dispatching::{rules, Candidate, RuleEngine, SchedulingContext};
//! use cpu_sched::models::Process;
//!
//! let long = Process::new("long", 0, 9).with_input_index(0);
//! let short = Process::new("short", 0, 2).with_input_index(1);
//! let ready = [Candidate::fresh(0, &long), Candidate::fresh(1, &short)];
//!
//! let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);
//! let best = engine.select_best(&ready, &SchedulingContext::at_time(0));
//! assert_eq!(best, Some(1));
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{Candidate, SchedulingContext};
pub use engine::RuleEngine;

use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = selected first.
pub type RuleScore = i64;

/// A rule ranking ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a candidate at the current scheduling point.
    fn evaluate(&self, candidate: &Candidate<'_>, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
