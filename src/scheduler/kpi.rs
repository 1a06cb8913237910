//! Scheduling performance metrics.
//!
//! Computes per-process and aggregate metrics from a canonical timeline
//! and the process set that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | End of the process's last interval |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first start - arrival |
//! | CPU Utilization | busy time / elapsed time |
//! | Throughput | processes / elapsed time |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use std::collections::HashMap;

use crate::error::SimulationError;
use crate::models::{AggregateMetrics, ProcessMetrics, ProcessSet, Time, Timeline};

/// Metrics for one simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Per-process metrics in the caller's input order.
    pub per_process: Vec<ProcessMetrics>,
    /// Averages and CPU-level figures.
    pub aggregate: AggregateMetrics,
}

#[derive(Debug, Clone, Copy)]
struct Occupancy {
    first_start: Time,
    last_end: Time,
    served: Time,
}

impl ScheduleKpi {
    /// Computes metrics from a canonical timeline.
    ///
    /// # Errors
    /// `Computation` if a process never runs, runs before it arrives, or
    /// receives a different amount of CPU than its burst. These indicate a
    /// strategy bug and are surfaced rather than reported as metrics.
    pub fn calculate(timeline: &Timeline, processes: &ProcessSet) -> Result<Self, SimulationError> {
        let mut occupancy: HashMap<&str, Occupancy> = HashMap::with_capacity(processes.len());
        for event in timeline.iter() {
            let Some(id) = event.process_id() else {
                continue;
            };
            occupancy
                .entry(id)
                .and_modify(|o| {
                    o.last_end = o.last_end.max(event.end);
                    o.served += event.duration();
                })
                .or_insert(Occupancy {
                    first_start: event.start,
                    last_end: event.end,
                    served: event.duration(),
                });
        }

        if occupancy.len() > processes.len() {
            let stray = occupancy
                .keys()
                .find(|id| processes.find(id).is_none())
                .copied();
            return Err(SimulationError::computation(
                stray,
                "timeline contains a process that was not submitted",
            ));
        }

        let mut per_process = Vec::with_capacity(processes.len());
        for process in processes {
            let Some(o) = occupancy.get(process.id.as_str()) else {
                return Err(SimulationError::computation(
                    Some(&process.id),
                    "process never appears in the timeline",
                ));
            };
            if o.first_start < process.arrival {
                return Err(SimulationError::computation(
                    Some(&process.id),
                    format!(
                        "started at {} before arriving at {}",
                        o.first_start, process.arrival
                    ),
                ));
            }
            if o.served != process.burst {
                return Err(SimulationError::computation(
                    Some(&process.id),
                    format!("received {} CPU units, burst is {}", o.served, process.burst),
                ));
            }

            let turnaround = o.last_end - process.arrival;
            per_process.push((
                process.input_index,
                ProcessMetrics {
                    process_id: process.id.clone(),
                    arrival: process.arrival,
                    burst: process.burst,
                    first_start: o.first_start,
                    completion: o.last_end,
                    turnaround,
                    waiting: turnaround - process.burst,
                    response: o.first_start - process.arrival,
                },
            ));
        }
        per_process.sort_by_key(|(input_index, _)| *input_index);
        let per_process: Vec<ProcessMetrics> = per_process.into_iter().map(|(_, m)| m).collect();

        let aggregate = Self::aggregate(&per_process, timeline);
        Ok(Self {
            per_process,
            aggregate,
        })
    }

    fn aggregate(per_process: &[ProcessMetrics], timeline: &Timeline) -> AggregateMetrics {
        // Summed in f64: n turnarounds can exceed i64 even when the horizon fits.
        let mean = |f: fn(&ProcessMetrics) -> Time| -> f64 {
            if per_process.is_empty() {
                0.0
            } else {
                per_process.iter().map(|m| f(m) as f64).sum::<f64>() / per_process.len() as f64
            }
        };

        let elapsed = timeline.elapsed();
        let busy_time = timeline.busy_time();
        let (cpu_utilization, throughput) = if elapsed > 0 {
            (
                busy_time as f64 / elapsed as f64,
                per_process.len() as f64 / elapsed as f64,
            )
        } else {
            (0.0, 0.0)
        };

        AggregateMetrics {
            avg_waiting: mean(|m| m.waiting),
            avg_turnaround: mean(|m| m.turnaround),
            avg_response: mean(|m| m.response),
            cpu_utilization,
            throughput,
            total_time: timeline.end(),
            busy_time,
            idle_time: timeline.idle_time(),
            context_switches: timeline.context_switches(),
        }
    }

    /// Metrics for one process.
    pub fn metrics_for(&self, process_id: &str) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.process_id == process_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, ScheduleEvent};

    fn fcfs_set() -> ProcessSet {
        ProcessSet::new(vec![
            Process::new("P1", 0, 5).with_input_index(0),
            Process::new("P2", 1, 3).with_input_index(1),
            Process::new("P3", 2, 8).with_input_index(2),
        ])
    }

    #[test]
    fn test_fcfs_metrics() {
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 5),
            ScheduleEvent::running("P2", 5, 8),
            ScheduleEvent::running("P3", 8, 16),
        ]);
        let kpi = ScheduleKpi::calculate(&timeline, &fcfs_set()).unwrap();

        let waiting: Vec<Time> = kpi.per_process.iter().map(|m| m.waiting).collect();
        assert_eq!(waiting, vec![0, 4, 6]);
        let p3 = kpi.metrics_for("P3").unwrap();
        assert_eq!(p3.completion, 16);
        assert_eq!(p3.turnaround, 14);
        assert_eq!(p3.response, 6);

        assert!((kpi.aggregate.avg_waiting - 10.0 / 3.0).abs() < 1e-10);
        assert!((kpi.aggregate.avg_turnaround - 26.0 / 3.0).abs() < 1e-10);
        assert!((kpi.aggregate.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.aggregate.total_time, 16);
        assert_eq!(kpi.aggregate.context_switches, 2);
    }

    #[test]
    fn test_response_differs_from_waiting_when_preempted() {
        let set = ProcessSet::new(vec![
            Process::new("P1", 0, 5).with_input_index(0),
            Process::new("P2", 1, 3).with_input_index(1),
        ]);
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 2),
            ScheduleEvent::running("P2", 2, 4),
            ScheduleEvent::running("P1", 4, 6),
            ScheduleEvent::running("P2", 6, 7),
            ScheduleEvent::running("P1", 7, 8),
        ]);
        let kpi = ScheduleKpi::calculate(&timeline, &set).unwrap();
        let p1 = kpi.metrics_for("P1").unwrap();
        assert_eq!((p1.completion, p1.waiting, p1.response), (8, 3, 0));
        let p2 = kpi.metrics_for("P2").unwrap();
        assert_eq!((p2.completion, p2.waiting, p2.response), (7, 3, 1));
        assert_eq!(kpi.aggregate.context_switches, 4);
    }

    #[test]
    fn test_utilization_with_idle() {
        let set = ProcessSet::new(vec![
            Process::new("P1", 0, 2).with_input_index(0),
            Process::new("P2", 4, 2).with_input_index(1),
        ]);
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 2),
            ScheduleEvent::idle(2, 4),
            ScheduleEvent::running("P2", 4, 6),
        ]);
        let kpi = ScheduleKpi::calculate(&timeline, &set).unwrap();
        assert!((kpi.aggregate.cpu_utilization - 4.0 / 6.0).abs() < 1e-10);
        assert!((kpi.aggregate.throughput - 2.0 / 6.0).abs() < 1e-10);
        assert_eq!(kpi.aggregate.idle_time, 2);
        assert_eq!(kpi.aggregate.busy_time, 4);
    }

    #[test]
    fn test_input_order_preserved() {
        let set = ProcessSet::new(vec![
            Process::new("late", 3, 1).with_input_index(0),
            Process::new("early", 0, 3).with_input_index(1),
        ]);
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("early", 0, 3),
            ScheduleEvent::running("late", 3, 4),
        ]);
        let kpi = ScheduleKpi::calculate(&timeline, &set).unwrap();
        let ids: Vec<&str> = kpi.per_process.iter().map(|m| m.process_id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn test_averages_do_not_overflow_on_long_horizon() {
        let burst: Time = 1 << 53;
        let set = ProcessSet::new(
            (0..100)
                .map(|i| Process::new(format!("P{i}"), 0, burst).with_input_index(i))
                .collect(),
        );
        let timeline = Timeline::new(
            (0..100)
                .map(|i| ScheduleEvent::running(format!("P{i}"), i * burst, (i + 1) * burst))
                .collect(),
        );
        let kpi = ScheduleKpi::calculate(&timeline, &set).unwrap();

        // Turnarounds are burst, 2*burst, ..., 100*burst.
        let expected = 50.5 * burst as f64;
        assert!((kpi.aggregate.avg_turnaround - expected).abs() / expected < 1e-12);
        assert!((kpi.aggregate.avg_waiting - 49.5 * burst as f64).abs() / expected < 1e-12);
        assert_eq!(kpi.aggregate.avg_response, kpi.aggregate.avg_waiting);
    }

    #[test]
    fn test_missing_process_is_computation_error() {
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 5),
            ScheduleEvent::running("P2", 5, 8),
        ]);
        let err = ScheduleKpi::calculate(&timeline, &fcfs_set()).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Computation {
                process_id: Some("P3".into()),
                message: "process never appears in the timeline".into(),
            }
        );
    }

    #[test]
    fn test_wrong_service_is_computation_error() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 5)]);
        let timeline = Timeline::new(vec![ScheduleEvent::running("P1", 0, 4)]);
        assert!(ScheduleKpi::calculate(&timeline, &set).is_err());
    }

    #[test]
    fn test_start_before_arrival_is_computation_error() {
        let set = ProcessSet::new(vec![Process::new("P1", 2, 2)]);
        let timeline = Timeline::new(vec![ScheduleEvent::running("P1", 0, 2)]);
        assert!(ScheduleKpi::calculate(&timeline, &set).is_err());
    }

    #[test]
    fn test_unknown_process_in_timeline() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 1)]);
        let timeline = Timeline::new(vec![
            ScheduleEvent::running("P1", 0, 1),
            ScheduleEvent::running("ghost", 1, 2),
        ]);
        let err = ScheduleKpi::calculate(&timeline, &set).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Computation { process_id: Some(ref id), .. } if id == "ghost"
        ));
    }
}
