//! Process model.
//!
//! A process is a unit of CPU work: it becomes ready at its arrival time
//! and needs `burst` time units of CPU before it completes.
//!
//! Two shapes exist:
//! - [`RawProcess`]: the loosely-typed record handed over by a form or a
//!   request body. Every numeric field may be missing or malformed.
//! - [`Process`]: the validated form produced by
//!   [`validate_processes`](crate::validation::validate_processes).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Simulated time, in abstract integer units.
pub type Time = i64;

/// An unvalidated process record.
///
/// Numeric fields are kept as `f64` so that values coming from a form
/// (`parseInt` producing `NaN`, `2.5`, `-1`) reach the validator intact.
/// When deserializing, `null` reads as missing, numeric strings are parsed,
/// and any other non-number (`"abc"`, `true`, `[]`) becomes `NaN` so the
/// validator reports it against the process id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProcess {
    /// Process identifier.
    #[serde(alias = "pid")]
    pub id: String,
    /// Arrival time.
    #[serde(default, deserialize_with = "lenient_number")]
    pub arrival: Option<f64>,
    /// CPU burst time.
    #[serde(default, deserialize_with = "lenient_number")]
    pub burst: Option<f64>,
    /// Scheduling priority. Only required by the priority algorithm.
    #[serde(default, deserialize_with = "lenient_number")]
    pub priority: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }))
}

impl RawProcess {
    /// Creates a record with arrival and burst set.
    pub fn new(id: impl Into<String>, arrival: f64, burst: f64) -> Self {
        Self {
            id: id.into(),
            arrival: Some(arrival),
            burst: Some(burst),
            priority: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A validated process.
///
/// # Invariants
/// - `id` is non-empty and unique within its [`ProcessSet`].
/// - `arrival >= 0`, `burst > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier.
    pub id: String,
    /// Time at which the process becomes ready.
    pub arrival: Time,
    /// Total CPU time required.
    pub burst: Time,
    /// Scheduling priority (direction set by
    /// [`PriorityOrder`](crate::config::PriorityOrder)).
    pub priority: i64,
    /// Position in the caller's input list. Final tie-breaker.
    pub input_index: usize,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(id: impl Into<String>, arrival: Time, burst: Time) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            priority: 0,
            input_index: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the input position.
    pub fn with_input_index(mut self, input_index: usize) -> Self {
        self.input_index = input_index;
        self
    }
}

/// Validated processes, sorted by arrival time (stable on input order).
///
/// Strategies index into this set; the position of a process in the set
/// is its canonical identity during a simulation. Only [`ProcessSet::new`]
/// builds one, so the ordering always holds; the set serializes but is
/// never deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Builds a set, sorting by `(arrival, input_index)`.
    pub fn new(mut processes: Vec<Process>) -> Self {
        processes.sort_by_key(|p| (p.arrival, p.input_index));
        Self { processes }
    }

    /// Processes in canonical order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Finds a process by identifier.
    pub fn find(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Earliest arrival, or `None` for an empty set.
    pub fn first_arrival(&self) -> Option<Time> {
        self.processes.first().map(|p| p.arrival)
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> Time {
        self.processes.iter().map(|p| p.burst).sum()
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 3, 7).with_priority(2).with_input_index(4);
        assert_eq!(p.id, "P1");
        assert_eq!(p.arrival, 3);
        assert_eq!(p.burst, 7);
        assert_eq!(p.priority, 2);
        assert_eq!(p.input_index, 4);
    }

    #[test]
    fn test_set_sorted_by_arrival_stable() {
        let set = ProcessSet::new(vec![
            Process::new("late", 5, 1).with_input_index(0),
            Process::new("b", 0, 1).with_input_index(2),
            Process::new("a", 0, 1).with_input_index(1),
        ]);
        let ids: Vec<&str> = set.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "late"]);
        assert_eq!(set.first_arrival(), Some(0));
    }

    #[test]
    fn test_set_serializes_in_canonical_order() {
        let set = ProcessSet::new(vec![
            Process::new("second", 4, 1).with_input_index(0),
            Process::new("first", 1, 1).with_input_index(1),
        ]);
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["processes"][0]["id"], "first");
        assert_eq!(value["processes"][1]["id"], "second");
    }

    #[test]
    fn test_set_totals() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)]);
        assert_eq!(set.total_burst(), 8);
        assert_eq!(set.find("P2").map(|p| p.arrival), Some(1));
        assert!(set.find("P9").is_none());
    }

    #[test]
    fn test_raw_process_accepts_pid_alias() {
        let raw: RawProcess =
            serde_json::from_str(r#"{"pid":"P1","arrival":0,"burst":4}"#).unwrap();
        assert_eq!(raw.id, "P1");
        assert_eq!(raw.burst, Some(4.0));
        assert_eq!(raw.priority, None);
    }

    #[test]
    fn test_raw_process_non_numbers_become_nan() {
        let raw: RawProcess = serde_json::from_str(
            r#"{"id":"P1","arrival":"3","burst":"abc","priority":true}"#,
        )
        .unwrap();
        assert_eq!(raw.arrival, Some(3.0));
        assert!(raw.burst.is_some_and(f64::is_nan));
        assert!(raw.priority.is_some_and(f64::is_nan));

        let raw: RawProcess =
            serde_json::from_str(r#"{"id":"P2","arrival":null,"burst":[1]}"#).unwrap();
        assert_eq!(raw.arrival, None);
        assert!(raw.burst.is_some_and(f64::is_nan));
    }
}
