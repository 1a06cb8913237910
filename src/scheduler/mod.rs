//! Scheduling strategies, timeline building and KPI evaluation.
//!
//! # Strategies
//!
//! | Algorithm | Type | Preemptive |
//! |-----------|------|------------|
//! | FCFS | [`NonPreemptive::fcfs`] | no |
//! | SJF | [`NonPreemptive::sjf`] | no |
//! | PRIORITY | [`NonPreemptive::priority`] | no |
//! | SRTF | [`Srtf`] | on arrival |
//! | ROUND_ROBIN | [`RoundRobin`] | on quantum expiry |
//!
//! Each strategy turns a [`ProcessSet`] into a raw event stream; the
//! [`timeline`] module canonicalizes it and [`ScheduleKpi`] derives the
//! metrics.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod non_preemptive;
mod ready_queue;
mod round_robin;
mod srtf;
pub mod timeline;

pub use kpi::ScheduleKpi;
pub use non_preemptive::NonPreemptive;
pub use ready_queue::ReadyQueue;
pub use round_robin::RoundRobin;
pub use srtf::Srtf;
pub use timeline::TimelineBuilder;

use crate::config::{Algorithm, SimulationConfig};
use crate::error::SimulationError;
use crate::models::{ProcessSet, ScheduleEvent, Time};

/// A single-CPU scheduling discipline.
///
/// Implementations are pure: all simulation state lives inside one
/// `schedule` call, so a strategy can be shared between threads.
pub trait Strategy: Send + Sync + std::fmt::Debug {
    /// Algorithm name.
    fn name(&self) -> &'static str;

    /// Simulates `processes` with the clock starting at `start`.
    ///
    /// `start` must not be later than the first arrival. Returns intervals
    /// in time order; idle gaps may be explicit or left for the timeline
    /// builder to fill.
    fn schedule(&self, processes: &ProcessSet, start: Time) -> Vec<ScheduleEvent>;
}

/// Builds the strategy for an algorithm.
///
/// # Errors
/// `Configuration` when Round Robin lacks a positive quantum.
pub fn strategy_for(
    algorithm: Algorithm,
    config: &SimulationConfig,
) -> Result<Box<dyn Strategy>, SimulationError> {
    Ok(match algorithm {
        Algorithm::Fcfs => Box::new(NonPreemptive::fcfs()),
        Algorithm::Sjf => Box::new(NonPreemptive::sjf()),
        Algorithm::Priority => Box::new(NonPreemptive::priority(config.priority_order)),
        Algorithm::Srtf => Box::new(Srtf::new()),
        Algorithm::RoundRobin => Box::new(RoundRobin::new(config.require_quantum()?)?),
    })
}
