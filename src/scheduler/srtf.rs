//! Shortest Remaining Time First (preemptive SJF).
//!
//! # Algorithm
//!
//! Discrete-event simulation: the clock jumps straight to the next
//! interesting instant, either the next arrival or the running process's
//! completion, whichever comes first.
//!
//! At each arrival the newcomers are compared with the running process.
//! Only a newcomer with *strictly* smaller remaining time preempts; an
//! equal one waits. When the CPU is free the ready process with the least
//! remaining time runs (ties: arrival, then input order).
//!
//! Intervals are split at every arrival even without preemption; the
//! timeline builder merges the pieces back together.
//!
//! # Complexity
//! O(n²): at most 2n events, each selecting over the ready set.

use log::debug;

use super::ready_queue::ArrivalCursor;
use super::Strategy;
use crate::dispatching::{rules, Candidate, RuleEngine, SchedulingContext};
use crate::models::{ProcessSet, ScheduleEvent, Time};

/// Preemptive shortest-remaining-time scheduler.
#[derive(Debug, Clone)]
pub struct Srtf {
    engine: RuleEngine,
}

impl Srtf {
    /// Creates the scheduler.
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new().with_rule(rules::ShortestRemaining),
        }
    }
}

impl Default for Srtf {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn schedule(&self, processes: &ProcessSet, start: Time) -> Vec<ScheduleEvent> {
        let procs = processes.processes();
        // Working copy; the caller's processes are never touched.
        let mut remaining: Vec<Time> = procs.iter().map(|p| p.burst).collect();
        let mut events = Vec::with_capacity(procs.len() * 2);
        let mut arrivals = ArrivalCursor::new(procs);
        let mut ready: Vec<usize> = Vec::new();
        let mut running: Option<usize> = None;
        let mut clock = start;
        let mut completed = 0;

        while completed < procs.len() {
            let arrived = arrivals.admit(clock);

            if let Some(current) = running {
                if arrived.clone().any(|i| remaining[i] < remaining[current]) {
                    debug!(
                        "SRTF: t={clock} preempt {} (remaining {})",
                        procs[current].id, remaining[current]
                    );
                    ready.push(current);
                    running = None;
                }
            }
            ready.extend(arrived);

            let current = match running {
                Some(current) => current,
                None => {
                    if ready.is_empty() {
                        let Some(next) = arrivals.next_arrival() else {
                            break;
                        };
                        debug!("SRTF: idle {clock}-{next}");
                        events.push(ScheduleEvent::idle(clock, next));
                        clock = next;
                        continue;
                    }

                    let context = SchedulingContext::at_time(clock);
                    let candidates: Vec<Candidate<'_>> = ready
                        .iter()
                        .map(|&i| Candidate::new(i, &procs[i], remaining[i]))
                        .collect();
                    let Some(chosen) = self
                        .engine
                        .select_best(&candidates, &context)
                        .map(|pos| candidates[pos].index)
                    else {
                        break;
                    };
                    ready.retain(|&i| i != chosen);
                    debug!(
                        "SRTF: t={clock} dispatch {} (remaining {})",
                        procs[chosen].id, remaining[chosen]
                    );
                    running = Some(chosen);
                    chosen
                }
            };

            let finish = clock + remaining[current];
            let end = match arrivals.next_arrival() {
                Some(next) if next < finish => next,
                _ => finish,
            };

            events.push(ScheduleEvent::running(&procs[current].id, clock, end));
            remaining[current] -= end - clock;
            clock = end;

            if remaining[current] == 0 {
                completed += 1;
                running = None;
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn set(specs: &[(&str, Time, Time)]) -> ProcessSet {
        ProcessSet::new(
            specs
                .iter()
                .enumerate()
                .map(|(i, &(id, arrival, burst))| {
                    Process::new(id, arrival, burst).with_input_index(i)
                })
                .collect(),
        )
    }

    fn render(events: &[ScheduleEvent]) -> Vec<String> {
        events.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_classic_preemption() {
        let ps = set(&[("P1", 0, 8), ("P2", 1, 4), ("P3", 2, 9), ("P4", 3, 5)]);
        let events = Srtf::new().schedule(&ps, 0);
        assert_eq!(
            render(&events),
            vec![
                "P1:0-1", "P2:1-2", "P2:2-3", "P2:3-5", "P4:5-10", "P1:10-17", "P3:17-26"
            ]
        );
    }

    #[test]
    fn test_equal_remaining_does_not_preempt() {
        // At t=2, P1 has 3 left and P2 needs 3: P1 keeps the CPU.
        let ps = set(&[("P1", 0, 5), ("P2", 2, 3)]);
        let events = Srtf::new().schedule(&ps, 0);
        assert_eq!(render(&events), vec!["P1:0-2", "P1:2-5", "P2:5-8"]);
    }

    #[test]
    fn test_idle_between_arrivals() {
        let ps = set(&[("P1", 0, 1), ("P2", 4, 2)]);
        let events = Srtf::new().schedule(&ps, 0);
        assert_eq!(render(&events), vec!["P1:0-1", "idle:1-4", "P2:4-6"]);
    }

    #[test]
    fn test_simultaneous_arrivals_pick_shortest() {
        let ps = set(&[("A", 0, 6), ("B", 0, 2), ("C", 0, 4)]);
        let events = Srtf::new().schedule(&ps, 0);
        assert_eq!(render(&events), vec!["B:0-2", "C:2-6", "A:6-12"]);
    }

    #[test]
    fn test_preempted_process_resumes_with_remaining() {
        let ps = set(&[("long", 0, 10), ("short", 3, 1)]);
        let events = Srtf::new().schedule(&ps, 0);
        assert_eq!(render(&events), vec!["long:0-3", "short:3-4", "long:4-11"]);
    }
}
