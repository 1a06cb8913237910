//! Simulation façade.
//!
//! The single entry point of the engine:
//!
//! 1. Resolve the algorithm selector.
//! 2. Validate the raw processes into a [`ProcessSet`].
//! 3. Build the strategy (checks algorithm parameters).
//! 4. Run the strategy and canonicalize its output into a [`Timeline`].
//! 5. Compute metrics.
//!
//! Any failure aborts the call; no partial result is returned.
//!
//! # Example
//!
//! ```
//! use cpu_sched::config::SimulationConfig;
//! use cpu_sched::models::RawProcess;
//! use cpu_sched::simulation::simulate;
//!
//! let processes = vec![
//!     RawProcess::new("P1", 0.0, 5.0),
//!     RawProcess::new("P2", 1.0, 3.0),
//! ];
//! let config = SimulationConfig::new().with_quantum(2);
//! let result = simulate(&processes, "ROUND_ROBIN", &config).unwrap();
//!
//! assert_eq!(result.timeline.to_string(), "P1:0-2 | P2:2-4 | P1:4-6 | P2:6-7 | P1:7-8");
//! assert_eq!(result.metrics_for("P2").unwrap().completion, 7);
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Algorithm, SimulationConfig, TimelineOrigin};
use crate::error::{Result, SimulationError};
use crate::models::{AggregateMetrics, ProcessMetrics, ProcessSet, RawProcess, Time, Timeline};
use crate::scheduler::{strategy_for, timeline, ScheduleKpi};
use crate::validation::validate_processes;

/// Outcome of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Algorithm that produced the schedule.
    pub algorithm: Algorithm,
    /// Canonical Gantt timeline.
    pub timeline: Timeline,
    /// Per-process metrics, in input order.
    pub metrics: Vec<ProcessMetrics>,
    /// Averages and CPU-level figures.
    pub summary: AggregateMetrics,
}

impl SimulationResult {
    /// Metrics for one process.
    pub fn metrics_for(&self, process_id: &str) -> Option<&ProcessMetrics> {
        self.metrics.iter().find(|m| m.process_id == process_id)
    }
}

/// A complete simulation request, as a consumer would submit it.
///
/// Deserializes from `{ "algorithm": ..., "processes": [...], "quantum": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Algorithm selector (e.g. `"SRTF"`, `"rr"`).
    pub algorithm: String,
    /// Raw process records.
    pub processes: Vec<RawProcess>,
    /// Optional parameters.
    #[serde(flatten)]
    pub config: SimulationConfig,
}

impl SimulationRequest {
    /// Creates a request with a default configuration.
    pub fn new(algorithm: impl Into<String>, processes: Vec<RawProcess>) -> Self {
        Self {
            algorithm: algorithm.into(),
            processes,
            config: SimulationConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the simulation.
    pub fn run(&self) -> Result<SimulationResult> {
        simulate(&self.processes, &self.algorithm, &self.config)
    }
}

/// Runs a simulation from an algorithm name.
///
/// # Errors
/// `UnknownAlgorithm` for an unrecognized name, otherwise as
/// [`simulate_with`].
pub fn simulate(
    processes: &[RawProcess],
    algorithm: &str,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    let algorithm = algorithm.parse::<Algorithm>().inspect_err(|e| warn!("{e}"))?;
    simulate_with(processes, algorithm, config)
}

/// Runs a simulation.
///
/// # Errors
/// - `Validation` for malformed process data (all problems listed)
/// - `Configuration` for missing/invalid algorithm parameters
/// - `Computation` if an internal invariant breaks
pub fn simulate_with(
    processes: &[RawProcess],
    algorithm: Algorithm,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    let run = || -> Result<SimulationResult> {
        let set = validate_processes(processes, algorithm)?;
        let strategy = strategy_for(algorithm, config)?;
        let origin = origin_of(&set, config.origin);

        let raw = strategy.schedule(&set, origin);
        let timeline = timeline::build_timeline(raw, origin)?;
        check_conservation(&timeline, &set)?;
        let kpi = ScheduleKpi::calculate(&timeline, &set)?;

        Ok(SimulationResult {
            algorithm,
            timeline,
            metrics: kpi.per_process,
            summary: kpi.aggregate,
        })
    };

    match run() {
        Ok(result) => {
            info!(
                "{algorithm}: {} processes, {} intervals, avg waiting {:.2}, avg turnaround {:.2}, utilization {:.1}%",
                result.metrics.len(),
                result.timeline.len(),
                result.summary.avg_waiting,
                result.summary.avg_turnaround,
                result.summary.cpu_utilization * 100.0
            );
            Ok(result)
        }
        Err(e) => {
            warn!("{algorithm} simulation rejected: {e}");
            Err(e)
        }
    }
}

fn origin_of(set: &ProcessSet, origin: TimelineOrigin) -> Time {
    match origin {
        TimelineOrigin::FirstArrival => set.first_arrival().unwrap_or(0),
        TimelineOrigin::Zero => 0,
    }
}

/// Busy time must equal the total burst.
fn check_conservation(timeline: &Timeline, set: &ProcessSet) -> Result<()> {
    let busy = timeline.busy_time();
    let work = set.total_burst();
    if busy != work {
        return Err(SimulationError::computation(
            None,
            format!("timeline serves {busy} CPU units for {work} units of work"),
        ));
    }
    Ok(())
}
