//! Error taxonomy for simulation requests.
//!
//! Every failure aborts the whole request; no partial result is returned.

use std::fmt;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// A failed simulation request.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Malformed or insufficient process data. Holds every problem found.
    Validation(Vec<ValidationError>),
    /// Missing or invalid algorithm parameter.
    Configuration {
        /// Parameter name (e.g. `"quantum"`).
        parameter: &'static str,
        /// Human-readable description.
        message: String,
    },
    /// Unrecognized algorithm selector.
    UnknownAlgorithm {
        /// The rejected selector.
        name: String,
    },
    /// Internal invariant violated while building the result.
    Computation {
        /// Process involved, if any.
        process_id: Option<String>,
        /// Human-readable description.
        message: String,
    },
}

impl SimulationError {
    pub(crate) fn computation(process_id: Option<&str>, message: impl Into<String>) -> Self {
        Self::Computation {
            process_id: process_id.map(str::to_string),
            message: message.into(),
        }
    }

    /// Validation errors, empty for other variants.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "invalid process data")?;
                for (i, e) in errors.iter().enumerate() {
                    f.write_str(if i == 0 { ": " } else { "; " })?;
                    f.write_str(&e.message)?;
                }
                Ok(())
            }
            Self::Configuration { parameter, message } => {
                write!(f, "invalid configuration '{parameter}': {message}")
            }
            Self::UnknownAlgorithm { name } => write!(f, "unknown algorithm '{name}'"),
            Self::Computation {
                process_id: Some(id),
                message,
            } => write!(f, "internal scheduling error for '{id}': {message}"),
            Self::Computation {
                process_id: None,
                message,
            } => write!(f, "internal scheduling error: {message}"),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}
