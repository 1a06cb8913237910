//! Deterministic CPU scheduling engine.
//!
//! Given a set of processes (id, arrival, burst, optional priority) and a
//! scheduling discipline, computes the single-CPU execution timeline and
//! the per-process performance metrics a scheduling course works with.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `RawProcess`, `Process`, `ProcessSet`,
//!   `ScheduleEvent`, `Timeline`, `ProcessMetrics`
//! - **`validation`**: Raw input checks (ids, numeric fields, priorities)
//! - **`dispatching`**: Stateless selection rules and the rule engine
//! - **`scheduler`**: FCFS, SJF, SRTF, Priority and Round Robin strategies,
//!   timeline building and metrics
//! - **`simulation`**: The façade tying it all together
//!
//! # Architecture
//!
//! Control flow per request is strictly linear:
//! validation → strategy → timeline → metrics. Nothing is retained between
//! requests, so simulations may run in parallel. The engine performs no
//! I/O and no serialization; result types derive `serde` traits for
//! consumers that need them.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;

pub use config::{Algorithm, SimulationConfig};
pub use error::{Result, SimulationError};
pub use simulation::{simulate, simulate_with, SimulationRequest, SimulationResult};
