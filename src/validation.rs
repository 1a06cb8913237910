//! Input validation for simulation requests.
//!
//! Turns raw process records into a [`ProcessSet`]. Detects:
//! - Empty or duplicate identifiers
//! - Missing, non-numeric, fractional or negative arrival/burst values
//! - Zero burst times
//! - Missing priorities when the priority algorithm is selected
//!
//! All problems are collected before failing, so a caller can report
//! every offending field at once.

use std::collections::HashSet;

use log::debug;

use crate::config::Algorithm;
use crate::models::{Process, ProcessSet, RawProcess, Time};

/// Validation result.
pub type ValidationResult = Result<ProcessSet, Vec<ValidationError>>;

/// Largest magnitude accepted for any numeric field (2^53 - 1).
///
/// Every integer up to this bound is exactly representable in `f64`.
pub const MAX_VALUE: f64 = 9_007_199_254_740_991.0;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process, if the error is tied to one.
    pub process_id: Option<String>,
    /// Offending field, if the error is tied to one.
    pub field: Option<&'static str>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// A process has an empty identifier.
    EmptyId,
    /// Two processes share the same identifier.
    DuplicateId,
    /// A required numeric field is absent.
    MissingField,
    /// A numeric field is NaN or infinite.
    NotANumber,
    /// A numeric field has a fractional part.
    NotAnInteger,
    /// A numeric field is below zero.
    Negative,
    /// Burst time is zero.
    ZeroBurst,
    /// The priority algorithm was selected but a priority is absent.
    MissingPriority,
    /// A value (or the simulated horizon) exceeds the supported range.
    OutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            process_id: None,
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn for_field(
        kind: ValidationErrorKind,
        process_id: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            process_id: Some(process_id.into()),
            field: Some(field),
            message: message.into(),
        }
    }
}

/// Validates raw records for the given algorithm.
///
/// Checks:
/// 1. At least one process
/// 2. Non-empty, unique identifiers
/// 3. Arrival present, finite, integral, `>= 0`
/// 4. Burst present, finite, integral, `> 0`
/// 5. Priority present when `algorithm` requires it; finite and integral when given
/// 6. `latest arrival + total burst` fits in [`Time`]
///
/// Omitted priorities default to 0 for algorithms that ignore them.
///
/// # Returns
/// The processes sorted by arrival time (ties keep input order), or every
/// detected issue.
pub fn validate_processes(raw: &[RawProcess], algorithm: Algorithm) -> ValidationResult {
    let mut errors = Vec::new();

    if raw.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "At least one process is required",
        ));
        return Err(errors);
    }

    let mut seen_ids = HashSet::new();
    let mut processes = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let id = record.id.trim();
        if id.is_empty() {
            errors.push(ValidationError {
                kind: ValidationErrorKind::EmptyId,
                process_id: None,
                field: Some("id"),
                message: format!("Process #{} has an empty identifier", index + 1),
            });
        } else if !seen_ids.insert(id) {
            errors.push(ValidationError::for_field(
                ValidationErrorKind::DuplicateId,
                id,
                "id",
                format!("Duplicate process ID: {id}"),
            ));
        }

        // Numeric checks still run for unnamed processes; label them by position.
        let label = if id.is_empty() {
            format!("#{}", index + 1)
        } else {
            id.to_string()
        };

        let arrival = integer_field(&label, "arrival", record.arrival, &mut errors);
        if let Some(a) = arrival {
            if a < 0 {
                errors.push(ValidationError::for_field(
                    ValidationErrorKind::Negative,
                    &label,
                    "arrival",
                    format!("Process '{label}': arrival time must not be negative, got {a}"),
                ));
            }
        }

        let burst = integer_field(&label, "burst", record.burst, &mut errors);
        if let Some(b) = burst {
            if b < 0 {
                errors.push(ValidationError::for_field(
                    ValidationErrorKind::Negative,
                    &label,
                    "burst",
                    format!("Process '{label}': burst time must not be negative, got {b}"),
                ));
            } else if b == 0 {
                errors.push(ValidationError::for_field(
                    ValidationErrorKind::ZeroBurst,
                    &label,
                    "burst",
                    format!("Process '{label}': burst time must be greater than 0"),
                ));
            }
        }

        let priority = if record.priority.is_none() && algorithm.requires_priority() {
            errors.push(ValidationError::for_field(
                ValidationErrorKind::MissingPriority,
                &label,
                "priority",
                format!("Process '{label}': priority is required by the {algorithm} algorithm"),
            ));
            None
        } else if record.priority.is_none() {
            Some(0)
        } else {
            integer_field(&label, "priority", record.priority, &mut errors)
        };

        if let (Some(arrival), Some(burst), Some(priority)) = (arrival, burst, priority) {
            processes.push(
                Process::new(id, arrival, burst)
                    .with_priority(priority)
                    .with_input_index(index),
            );
        }
    }

    if errors.is_empty() {
        check_horizon(&processes, &mut errors);
    }

    if errors.is_empty() {
        let set = ProcessSet::new(processes);
        debug!("validated {} processes for {algorithm}", set.len());
        Ok(set)
    } else {
        Err(errors)
    }
}

/// Extracts an integral value, recording why it is unusable otherwise.
fn integer_field(
    label: &str,
    field: &'static str,
    value: Option<f64>,
    errors: &mut Vec<ValidationError>,
) -> Option<i64> {
    let value = match value {
        Some(v) => v,
        None => {
            errors.push(ValidationError::for_field(
                ValidationErrorKind::MissingField,
                label,
                field,
                format!("Process '{label}': {field} is required"),
            ));
            return None;
        }
    };

    let (kind, message) = if !value.is_finite() {
        (
            ValidationErrorKind::NotANumber,
            format!("Process '{label}': {field} must be a number"),
        )
    } else if value.fract() != 0.0 {
        (
            ValidationErrorKind::NotAnInteger,
            format!("Process '{label}': {field} must be an integer, got {value}"),
        )
    } else if value.abs() > MAX_VALUE {
        (
            ValidationErrorKind::OutOfRange,
            format!("Process '{label}': {field} is out of range, got {value}"),
        )
    } else {
        return Some(value as i64);
    };

    errors.push(ValidationError::for_field(kind, label, field, message));
    None
}

/// Ensures the whole simulation fits in [`Time`].
///
/// The clock never passes `max(arrival) + sum(burst)`.
fn check_horizon(processes: &[Process], errors: &mut Vec<ValidationError>) {
    let latest_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc: Time, p| acc.checked_add(p.burst));

    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            "Total simulated time exceeds the supported range",
        ));
    }
}
