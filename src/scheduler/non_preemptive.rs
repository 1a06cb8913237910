//! Non-preemptive strategies: FCFS, SJF and Priority.
//!
//! # Algorithm
//!
//! 1. At each scheduling point (CPU idle, or the running process finished),
//!    admit every process that has arrived.
//! 2. If none is ready, record an idle interval up to the next arrival.
//! 3. Otherwise let the rule engine pick one ready process and run it to
//!    completion.
//!
//! The three disciplines differ only in their primary rule; ties fall
//! through to arrival time, then input order.
//!
//! # Complexity
//! O(n²) selections over the ready set.

use log::debug;

use super::ready_queue::ArrivalCursor;
use super::Strategy;
use crate::config::PriorityOrder;
use crate::dispatching::{rules, Candidate, RuleEngine, SchedulingContext};
use crate::models::{ProcessSet, ScheduleEvent, Time};

/// Run-to-completion scheduler driven by a [`RuleEngine`].
#[derive(Debug, Clone)]
pub struct NonPreemptive {
    name: &'static str,
    engine: RuleEngine,
}

impl NonPreemptive {
    /// First-Come, First-Served: arrival order only.
    pub fn fcfs() -> Self {
        Self {
            name: "FCFS",
            engine: RuleEngine::new(),
        }
    }

    /// Shortest Job First.
    pub fn sjf() -> Self {
        Self {
            name: "SJF",
            engine: RuleEngine::new().with_rule(rules::ShortestRemaining),
        }
    }

    /// Priority scheduling in the given direction.
    pub fn priority(order: PriorityOrder) -> Self {
        Self {
            name: "PRIORITY",
            engine: RuleEngine::new().with_rule(rules::Priority::new(order)),
        }
    }
}

impl Strategy for NonPreemptive {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schedule(&self, processes: &ProcessSet, start: Time) -> Vec<ScheduleEvent> {
        let procs = processes.processes();
        let mut events = Vec::with_capacity(procs.len() * 2);
        let mut arrivals = ArrivalCursor::new(procs);
        let mut ready: Vec<usize> = Vec::new();
        let mut clock = start;
        let mut completed = 0;

        while completed < procs.len() {
            ready.extend(arrivals.admit(clock));

            if ready.is_empty() {
                let Some(next) = arrivals.next_arrival() else {
                    break;
                };
                debug!("{}: idle {clock}-{next}", self.name);
                events.push(ScheduleEvent::idle(clock, next));
                clock = next;
                continue;
            }

            let context = SchedulingContext::at_time(clock);
            let candidates: Vec<Candidate<'_>> = ready
                .iter()
                .map(|&i| Candidate::fresh(i, &procs[i]))
                .collect();
            let Some(chosen) = self
                .engine
                .select_best(&candidates, &context)
                .map(|pos| candidates[pos])
            else {
                break;
            };
            debug!(
                "{}: t={clock} dispatch {} (waited {}, {} ready)",
                self.name,
                chosen.process.id,
                context.waited(&chosen),
                ready.len()
            );

            ready.retain(|&i| i != chosen.index);
            let process = chosen.process;
            let end = clock + process.burst;
            events.push(ScheduleEvent::running(&process.id, clock, end));
            clock = end;
            completed += 1;
        }

        events
    }
}
