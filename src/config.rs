//! Simulation configuration.
//!
//! Algorithm selection and the knobs that only some algorithms read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimulationError;

/// Supported scheduling disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    /// First-Come, First-Served (non-preemptive).
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Priority scheduling (non-preemptive).
    Priority,
    /// Round Robin with a fixed quantum.
    RoundRobin,
}

impl Algorithm {
    /// All algorithms, in display order.
    pub const ALL: [Algorithm; 5] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Srtf,
        Self::Priority,
        Self::RoundRobin,
    ];

    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::Priority => "PRIORITY",
            Self::RoundRobin => "ROUND_ROBIN",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come, First-Served",
            Self::Sjf => "Shortest Job First (non-preemptive)",
            Self::Srtf => "Shortest Remaining Time First (preemptive)",
            Self::Priority => "Priority (non-preemptive)",
            Self::RoundRobin => "Round Robin",
        }
    }

    /// Whether every process must carry an explicit priority.
    pub fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority)
    }

    /// Whether the algorithm may interrupt a running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    /// Parses a selector, case-insensitively.
    ///
    /// `-` and spaces are treated as `_`, and `RR` / `ROUNDROBIN` are
    /// accepted for Round Robin.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "FCFS" => Ok(Self::Fcfs),
            "SJF" => Ok(Self::Sjf),
            "SRTF" => Ok(Self::Srtf),
            "PRIORITY" => Ok(Self::Priority),
            "ROUND_ROBIN" | "ROUNDROBIN" | "RR" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Which end of the priority scale wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Smaller number = higher priority.
    #[default]
    LowerIsHigher,
    /// Larger number = higher priority.
    HigherIsHigher,
}

/// Where the simulation clock starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineOrigin {
    /// At the earliest arrival.
    #[default]
    FirstArrival,
    /// At time 0; a late first arrival produces a leading idle interval.
    Zero,
}

/// Optional per-simulation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round Robin time slice. Required (and must be positive) for Round Robin.
    pub quantum: Option<i64>,
    /// Priority direction for the priority algorithm.
    pub priority_order: PriorityOrder,
    /// Clock origin.
    pub origin: TimelineOrigin,
}

impl SimulationConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the priority direction.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Sets the clock origin.
    pub fn with_origin(mut self, origin: TimelineOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the Round Robin quantum, checking it is present and positive.
    pub fn require_quantum(&self) -> Result<i64, SimulationError> {
        match self.quantum {
            None => Err(SimulationError::Configuration {
                parameter: "quantum",
                message: "Round Robin requires a time quantum".into(),
            }),
            Some(q) if q <= 0 => Err(SimulationError::Configuration {
                parameter: "quantum",
                message: format!("quantum must be a positive integer, got {q}"),
            }),
            Some(q) => Ok(q),
        }
    }
}
