//! Timeline (Gantt chart) model.
//!
//! A timeline is the ordered sequence of CPU occupancy intervals produced
//! by a scheduling strategy. Idle gaps are explicit, so a canonical
//! timeline covers `[start, end)` without holes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Time;

/// What occupies the CPU during an interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "process_id", rename_all = "snake_case")]
pub enum Slot {
    /// A process is running.
    Process(String),
    /// No process is ready.
    Idle,
}

impl Slot {
    /// Process identifier, `None` for idle.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::Process(id) => Some(id),
            Self::Idle => None,
        }
    }

    /// Whether this slot is idle time.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(id) => f.write_str(id),
            Self::Idle => f.write_str("idle"),
        }
    }
}

/// A half-open CPU occupancy interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// What runs during the interval.
    pub slot: Slot,
    /// Start time (inclusive).
    pub start: Time,
    /// End time (exclusive).
    pub end: Time,
}

impl ScheduleEvent {
    /// Creates an event for a running process.
    pub fn running(process_id: impl Into<String>, start: Time, end: Time) -> Self {
        Self {
            slot: Slot::Process(process_id.into()),
            start,
            end,
        }
    }

    /// Creates an idle event.
    pub fn idle(start: Time, end: Time) -> Self {
        Self {
            slot: Slot::Idle,
            start,
            end,
        }
    }

    /// Interval length.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// Process identifier, `None` for idle.
    #[inline]
    pub fn process_id(&self) -> Option<&str> {
        self.slot.process_id()
    }

    /// Whether this is an idle interval.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.slot.is_idle()
    }
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.slot, self.start, self.end)
    }
}

/// An ordered, contiguous sequence of [`ScheduleEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Events in time order.
    pub events: Vec<ScheduleEvent>,
}

impl Timeline {
    /// Wraps already-canonical events.
    pub fn new(events: Vec<ScheduleEvent>) -> Self {
        Self { events }
    }

    /// Start of the first event (0 when empty).
    pub fn start(&self) -> Time {
        self.events.first().map(|e| e.start).unwrap_or(0)
    }

    /// End of the last event (0 when empty).
    pub fn end(&self) -> Time {
        self.events.last().map(|e| e.end).unwrap_or(0)
    }

    /// Elapsed time covered by the timeline.
    pub fn elapsed(&self) -> Time {
        self.end() - self.start()
    }

    /// Total time some process held the CPU.
    pub fn busy_time(&self) -> Time {
        self.events
            .iter()
            .filter(|e| !e.is_idle())
            .map(|e| e.duration())
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> Time {
        self.events
            .iter()
            .filter(|e| e.is_idle())
            .map(|e| e.duration())
            .sum()
    }

    /// All events for a process, in time order.
    pub fn events_for(&self, process_id: &str) -> Vec<&ScheduleEvent> {
        self.events
            .iter()
            .filter(|e| e.process_id() == Some(process_id))
            .collect()
    }

    /// Number of hand-overs between two different processes.
    ///
    /// Idle gaps are skipped: `P1, idle, P2` counts as one switch.
    pub fn context_switches(&self) -> usize {
        let mut previous: Option<&str> = None;
        let mut switches = 0;
        for id in self.events.iter().filter_map(|e| e.process_id()) {
            if previous.is_some_and(|p| p != id) {
                switches += 1;
            }
            previous = Some(id);
        }
        switches
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the timeline has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates events in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEvent> {
        self.events.iter()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{event}")?;
        }
        Ok(())
    }
}
