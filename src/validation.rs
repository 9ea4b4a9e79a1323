//! Input validation for process sets.
//!
//! Checks structural integrity of user-entered process definitions
//! before a simulation is configured. Detects:
//! - Empty process sets
//! - Duplicate or reserved IDs
//! - Negative arrival times
//! - Non-positive burst times
//!
//! All failures are collected and reported together rather than
//! stopping at the first one.

use std::collections::HashSet;

use crate::models::{ProcessSpec, IDLE_ID};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID, or an ID collides with the idle
    /// sentinel.
    DuplicateId,
    /// A process arrives before tick 0.
    NegativeArrival,
    /// A process has a zero or negative burst time.
    NonPositiveBurst,
    /// The process set contains no processes.
    EmptyProcessSet,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set prior to configuring a simulation.
///
/// Checks:
/// 1. The set is non-empty
/// 2. No duplicate process IDs, and no process named after the idle
///    sentinel (`IDLE` is reserved for timeline gaps)
/// 3. `arrival_time >= 0` for every process
/// 4. `burst_time > 0` for every process
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "at least one process is required",
        ));
    }

    let mut seen = HashSet::new();
    for p in processes {
        if p.id == IDLE_ID {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("process id '{}' is reserved for idle segments", p.id),
            ));
        } else if !seen.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate process id: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "process '{}' must have a non-negative arrival time, got {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "process '{}' must have a positive burst time, got {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
