//! CPU scheduling domain models.
//!
//! Provides the data types consumed and produced by the engine:
//! processes going in, timelines and metrics coming out.
//!
//! # Lifecycle
//!
//! Every value here is created fresh for one simulation call. Nothing is
//! shared between calls.

mod metrics;
mod process;
mod timeline;

pub use metrics::{AggregateMetrics, ProcessMetrics};
pub use process::{Process, ProcessSet, RawProcess, Time};
pub use timeline::{ScheduleEvent, Slot, Timeline};
