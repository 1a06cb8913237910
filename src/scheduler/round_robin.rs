//! Round Robin scheduling.
//!
//! # Algorithm
//!
//! 1. The head of the [`ReadyQueue`] runs for `min(quantum, remaining)`.
//! 2. Processes that arrived during the slice (or exactly at its end) are
//!    appended to the queue.
//! 3. The served process, if unfinished, is appended after them.
//! 4. With an empty queue the clock jumps to the next arrival, recorded as
//!    idle time.
//!
//! # Complexity
//! O(Σ burst / quantum) slices, O(1) each.

use log::debug;

use super::ready_queue::{ArrivalCursor, ReadyQueue};
use super::Strategy;
use crate::error::SimulationError;
use crate::models::{ProcessSet, ScheduleEvent, Time};

/// Round Robin scheduler with a fixed quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: Time,
}

impl RoundRobin {
    /// Creates a scheduler.
    ///
    /// # Errors
    /// `Configuration` if `quantum <= 0`.
    pub fn new(quantum: Time) -> Result<Self, SimulationError> {
        if quantum <= 0 {
            return Err(SimulationError::Configuration {
                parameter: "quantum",
                message: format!("quantum must be a positive integer, got {quantum}"),
            });
        }
        Ok(Self { quantum })
    }

    /// The time slice.
    pub fn quantum(&self) -> Time {
        self.quantum
    }
}

impl Strategy for RoundRobin {
    fn name(&self) -> &'static str {
        "ROUND_ROBIN"
    }

    fn schedule(&self, processes: &ProcessSet, start: Time) -> Vec<ScheduleEvent> {
        let procs = processes.processes();
        let mut remaining: Vec<Time> = procs.iter().map(|p| p.burst).collect();
        let mut events = Vec::new();
        let mut arrivals = ArrivalCursor::new(procs);
        let mut queue = ReadyQueue::new();
        let mut clock = start;
        let mut completed = 0;

        queue.admit(arrivals.admit(clock));

        while completed < procs.len() {
            let Some(current) = queue.pop_front() else {
                let Some(next) = arrivals.next_arrival() else {
                    break;
                };
                debug!("RR: idle {clock}-{next}");
                events.push(ScheduleEvent::idle(clock, next));
                clock = next;
                queue.admit(arrivals.admit(clock));
                continue;
            };

            let slice = self.quantum.min(remaining[current]);
            events.push(ScheduleEvent::running(&procs[current].id, clock, clock + slice));
            clock += slice;
            remaining[current] -= slice;

            let unfinished = if remaining[current] > 0 {
                Some(current)
            } else {
                completed += 1;
                None
            };
            queue.end_slice(arrivals.admit(clock), unfinished);
            debug!(
                "RR: t={clock} served {} for {slice}, queue {:?}",
                procs[current].id,
                queue.iter().map(|i| procs[i].id.as_str()).collect::<Vec<_>>()
            );
        }

        events
    }
}
