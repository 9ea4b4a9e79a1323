//! Simulation error taxonomy.
//!
//! Three families: malformed process sets (validation), bad strategy
//! selection or parameters (configuration), and operations invoked in a
//! lifecycle state that forbids them (invalid state). All errors are
//! synchronous and surfaced directly to the caller; nothing is retried
//! or swallowed internally.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while configuring or driving a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The process set failed validation; every detected problem is listed.
    #[error("invalid process set: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),
    /// The requested strategy name is not one of the supported policies.
    #[error("unknown scheduling strategy: {0}")]
    UnknownStrategy(String),
    /// A strategy-required parameter is missing or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An operation was called in a lifecycle state that forbids it.
    #[error("invalid operation: {0}")]
    InvalidState(String),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::Validation(errors)
    }
}
