//! Per-process and aggregate performance metrics.

use serde::{Deserialize, Serialize};

use super::Time;

/// Timing outcome of a single process.
///
/// # Invariants
/// - `turnaround = completion - arrival >= burst`
/// - `waiting = turnaround - burst >= 0`
/// - `response = first start - arrival >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub process_id: String,
    /// Arrival time (copied from the input for display).
    pub arrival: Time,
    /// Burst time (copied from the input for display).
    pub burst: Time,
    /// First time the process held the CPU.
    pub first_start: Time,
    /// End of the last interval the process ran in.
    pub completion: Time,
    /// `completion - arrival`.
    pub turnaround: Time,
    /// `turnaround - burst`.
    pub waiting: Time,
    /// `first_start - arrival`.
    pub response: Time,
}

/// Averages over all processes of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Busy time / elapsed time (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit of elapsed time.
    pub throughput: f64,
    /// Latest completion time.
    pub total_time: Time,
    /// Time the CPU ran some process.
    pub busy_time: Time,
    /// Time the CPU had nothing to run.
    pub idle_time: Time,
    /// Hand-overs between different processes.
    pub context_switches: usize,
}
