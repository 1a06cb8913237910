//! Timeline builder.
//!
//! Turns the raw event stream of a strategy into a canonical [`Timeline`]:
//! - adjacent intervals of the same slot are merged,
//! - unlabeled gaps become explicit idle intervals,
//! - empty, reversed or overlapping intervals are rejected.

use crate::error::SimulationError;
use crate::models::{ScheduleEvent, Time, Timeline};

/// Incrementally builds a canonical timeline.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    events: Vec<ScheduleEvent>,
}

impl TimelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose timeline starts at `origin`.
    ///
    /// If the first pushed event starts later, the gap is filled with idle.
    pub fn starting_at(origin: Time) -> Self {
        Self {
            events: vec![ScheduleEvent::idle(origin, origin)],
        }
    }

    /// Appends one event.
    ///
    /// # Errors
    /// `Computation` if the event is empty/reversed or overlaps the
    /// previous one.
    pub fn push(&mut self, event: ScheduleEvent) -> Result<(), SimulationError> {
        if event.end <= event.start {
            return Err(SimulationError::computation(
                event.process_id(),
                format!("empty or reversed interval {event}"),
            ));
        }

        let Some(last) = self.events.last_mut() else {
            self.events.push(event);
            return Ok(());
        };

        if event.start < last.end {
            return Err(SimulationError::computation(
                event.process_id(),
                format!("interval {event} overlaps {last}"),
            ));
        }

        if event.start > last.end {
            let gap = ScheduleEvent::idle(last.end, event.start);
            if last.is_idle() {
                last.end = gap.end;
            } else {
                self.events.push(gap);
            }
        }

        // Re-borrow: a gap may have been appended above.
        match self.events.last_mut() {
            Some(last) if last.slot == event.slot => last.end = event.end,
            _ => self.events.push(event),
        }
        Ok(())
    }

    /// Appends events in order.
    pub fn extend(
        &mut self,
        events: impl IntoIterator<Item = ScheduleEvent>,
    ) -> Result<(), SimulationError> {
        events.into_iter().try_for_each(|e| self.push(e))
    }

    /// Finishes the timeline, dropping the zero-length origin marker.
    pub fn build(self) -> Timeline {
        Timeline::new(
            self.events
                .into_iter()
                .filter(|e| e.duration() > 0)
                .collect(),
        )
    }
}

/// Builds a canonical timeline from raw strategy output.
pub fn build_timeline(
    raw: Vec<ScheduleEvent>,
    origin: Time,
) -> Result<Timeline, SimulationError> {
    let mut builder = TimelineBuilder::starting_at(origin);
    builder.extend(raw)?;
    let timeline = builder.build();
    verify_timeline(&timeline)?;
    Ok(timeline)
}

/// Checks the canonical invariants: positive durations, contiguous,
/// time-ordered, no two neighbours with the same slot.
pub fn verify_timeline(timeline: &Timeline) -> Result<(), SimulationError> {
    for event in timeline.iter() {
        if event.duration() <= 0 {
            return Err(SimulationError::computation(
                event.process_id(),
                format!("non-positive interval {event}"),
            ));
        }
    }
    for pair in timeline.events.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.end != b.start {
            return Err(SimulationError::computation(
                b.process_id(),
                format!("timeline not contiguous between {a} and {b}"),
            ));
        }
        if a.slot == b.slot {
            return Err(SimulationError::computation(
                b.process_id(),
                format!("unmerged neighbours {a} and {b}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(t: &Timeline) -> String {
        t.to_string()
    }

    #[test]
    fn test_merges_adjacent_same_process() {
        let t = build_timeline(
            vec![
                ScheduleEvent::running("P1", 0, 2),
                ScheduleEvent::running("P1", 2, 4),
                ScheduleEvent::running("P2", 4, 5),
            ],
            0,
        )
        .unwrap();
        assert_eq!(render(&t), "P1:0-4 | P2:4-5");
    }

    #[test]
    fn test_fills_gaps_with_idle() {
        let t = build_timeline(
            vec![
                ScheduleEvent::running("P1", 0, 2),
                ScheduleEvent::running("P2", 5, 6),
            ],
            0,
        )
        .unwrap();
        assert_eq!(render(&t), "P1:0-2 | idle:2-5 | P2:5-6");
    }

    #[test]
    fn test_idle_merges_with_gap() {
        let t = build_timeline(
            vec![
                ScheduleEvent::running("P1", 0, 1),
                ScheduleEvent::idle(1, 3),
                ScheduleEvent::idle(3, 4),
                ScheduleEvent::running("P2", 6, 7),
            ],
            0,
        )
        .unwrap();
        assert_eq!(render(&t), "P1:0-1 | idle:1-6 | P2:6-7");
    }

    #[test]
    fn test_leading_gap_from_origin() {
        let t = build_timeline(vec![ScheduleEvent::running("P1", 3, 5)], 0).unwrap();
        assert_eq!(render(&t), "idle:0-3 | P1:3-5");

        let t = build_timeline(vec![ScheduleEvent::running("P1", 3, 5)], 3).unwrap();
        assert_eq!(render(&t), "P1:3-5");
    }

    #[test]
    fn test_does_not_merge_across_other_process() {
        let t = build_timeline(
            vec![
                ScheduleEvent::running("P1", 0, 1),
                ScheduleEvent::running("P2", 1, 2),
                ScheduleEvent::running("P1", 2, 3),
            ],
            0,
        )
        .unwrap();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_rejects_overlap() {
        let err = build_timeline(
            vec![
                ScheduleEvent::running("P1", 0, 3),
                ScheduleEvent::running("P2", 2, 4),
            ],
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Computation { process_id: Some(ref id), .. } if id == "P2"
        ));
    }

    #[test]
    fn test_rejects_empty_interval() {
        let err = build_timeline(vec![ScheduleEvent::running("P1", 2, 2)], 0).unwrap_err();
        assert!(matches!(err, SimulationError::Computation { .. }));
    }

    #[test]
    fn test_rejects_events_before_origin() {
        let err = build_timeline(vec![ScheduleEvent::running("P1", 0, 2)], 1).unwrap_err();
        assert!(matches!(err, SimulationError::Computation { .. }));
    }

    #[test]
    fn test_verify_catches_unmerged() {
        let t = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 1),
            ScheduleEvent::running("P1", 1, 2),
        ]);
        assert!(verify_timeline(&t).is_err());
    }
}
