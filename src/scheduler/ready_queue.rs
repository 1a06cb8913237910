//! Arrival tracking and the Round Robin ready queue.

use std::collections::VecDeque;
use std::ops::Range;

use crate::models::{Process, Time};

/// Walks a [`ProcessSet`](crate::models::ProcessSet) in arrival order,
/// handing out processes as the clock passes their arrival time.
#[derive(Debug, Clone)]
pub(crate) struct ArrivalCursor<'a> {
    processes: &'a [Process],
    next: usize,
}

impl<'a> ArrivalCursor<'a> {
    pub(crate) fn new(processes: &'a [Process]) -> Self {
        Self { processes, next: 0 }
    }

    /// Admits every process with `arrival <= clock` not admitted yet.
    ///
    /// Returns their canonical positions, in arrival then input order.
    pub(crate) fn admit(&mut self, clock: Time) -> Range<usize> {
        let from = self.next;
        while self
            .processes
            .get(self.next)
            .is_some_and(|p| p.arrival <= clock)
        {
            self.next += 1;
        }
        from..self.next
    }

    /// Arrival time of the next process not admitted yet.
    pub(crate) fn next_arrival(&self) -> Option<Time> {
        self.processes.get(self.next).map(|p| p.arrival)
    }
}

/// FIFO queue of ready processes for Round Robin.
///
/// # Insertion Policy
///
/// At the end of every slice, [`end_slice`](Self::end_slice) first appends
/// the processes that arrived while the slice ran (or exactly when it
/// ended), in arrival order, and only then re-appends the process that was
/// just served if it still has work left. A newcomer therefore always gets
/// the CPU before the process it arrived behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyQueue {
    queue: VecDeque<usize>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends newly arrived processes in the given order.
    pub fn admit(&mut self, arrived: impl IntoIterator<Item = usize>) {
        self.queue.extend(arrived);
    }

    /// Closes a slice: newcomers first, then the unfinished process.
    pub fn end_slice(
        &mut self,
        arrived: impl IntoIterator<Item = usize>,
        unfinished: Option<usize>,
    ) {
        self.admit(arrived);
        if let Some(index) = unfinished {
            self.queue.push_back(index);
        }
    }

    /// Removes the process at the head of the queue.
    pub fn pop_front(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    /// Whether no process is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of waiting processes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Waiting processes, head first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}
