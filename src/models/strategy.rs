//! Scheduling strategy selection and parameters.
//!
//! The supported policy set is closed and enumerable, so strategies are a
//! plain enum rather than an open trait hierarchy. Wire names follow the
//! original API (`FCFS`, `SJF_NP`, `SJF_P`, `ROUND_ROBIN`, `PRIORITY`,
//! `MLFQ`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Per-level time quanta used by MLFQ when none are configured.
pub const DEFAULT_LEVEL_QUANTA: [i64; 3] = [2, 4, 8];

/// The supported scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// First Come First Served: non-preemptive, arrival order.
    Fcfs,
    /// Shortest Job First, non-preemptive.
    SjfNp,
    /// Shortest Remaining Time First (preemptive SJF).
    SjfP,
    /// Round Robin with a fixed time quantum.
    RoundRobin,
    /// Priority scheduling (lower value = higher priority).
    Priority,
    /// Multilevel Feedback Queue.
    Mlfq,
}

impl StrategyKind {
    /// All supported policies, for exhaustive iteration in callers/tests.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Fcfs,
        StrategyKind::SjfNp,
        StrategyKind::SjfP,
        StrategyKind::RoundRobin,
        StrategyKind::Priority,
        StrategyKind::Mlfq,
    ];

    /// The wire name of this policy.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Fcfs => "FCFS",
            StrategyKind::SjfNp => "SJF_NP",
            StrategyKind::SjfP => "SJF_P",
            StrategyKind::RoundRobin => "ROUND_ROBIN",
            StrategyKind::Priority => "PRIORITY",
            StrategyKind::Mlfq => "MLFQ",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| SimulationError::UnknownStrategy(s.to_string()))
    }
}

/// Strategy-specific parameters.
///
/// Only the fields relevant to the selected policy are consulted;
/// everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyParams {
    /// Round Robin time quantum. Required (and positive) for `ROUND_ROBIN`.
    #[serde(default)]
    pub time_quantum: Option<i64>,
    /// Per-level quanta for MLFQ, highest-priority level first.
    /// Defaults to [`DEFAULT_LEVEL_QUANTA`] when absent.
    #[serde(default)]
    pub level_quanta: Option<Vec<i64>>,
    /// Whether Priority scheduling preempts on arrival of a
    /// higher-priority process. Defaults to true.
    #[serde(default = "default_true")]
    pub preemptive_priority: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            time_quantum: None,
            level_quanta: None,
            preemptive_priority: true,
        }
    }
}

impl StrategyParams {
    /// Creates parameters with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin time quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Sets the MLFQ per-level quanta (highest-priority level first).
    pub fn with_level_quanta(mut self, quanta: Vec<i64>) -> Self {
        self.level_quanta = Some(quanta);
        self
    }

    /// Selects non-preemptive Priority scheduling.
    pub fn non_preemptive_priority(mut self) -> Self {
        self.preemptive_priority = false;
        self
    }

    /// The validated Round Robin quantum.
    pub fn round_robin_quantum(&self) -> Result<i64, SimulationError> {
        match self.time_quantum {
            Some(q) if q > 0 => Ok(q),
            Some(q) => Err(SimulationError::InvalidConfig(format!(
                "time quantum must be positive, got {q}"
            ))),
            None => Err(SimulationError::InvalidConfig(
                "Round Robin requires a time quantum".to_string(),
            )),
        }
    }

    /// The validated MLFQ per-level quanta (defaulted when absent).
    pub fn mlfq_quanta(&self) -> Result<Vec<i64>, SimulationError> {
        match &self.level_quanta {
            None => Ok(DEFAULT_LEVEL_QUANTA.to_vec()),
            Some(quanta) if quanta.is_empty() => Err(SimulationError::InvalidConfig(
                "MLFQ requires at least one queue level".to_string(),
            )),
            Some(quanta) => {
                if let Some(bad) = quanta.iter().find(|&&q| q <= 0) {
                    return Err(SimulationError::InvalidConfig(format!(
                        "MLFQ level quanta must be positive, got {bad}"
                    )));
                }
                Ok(quanta.clone())
            }
        }
    }

    /// Checks that every parameter the given policy requires is present
    /// and valid.
    pub fn validate_for(&self, kind: StrategyKind) -> Result<(), SimulationError> {
        match kind {
            StrategyKind::RoundRobin => self.round_robin_quantum().map(|_| ()),
            StrategyKind::Mlfq => self.mlfq_quanta().map(|_| ()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in StrategyKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            let back: StrategyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
            assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_strategy_name() {
        let err = "LOTTERY".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, SimulationError::UnknownStrategy(s) if s == "LOTTERY"));
    }

    #[test]
    fn test_round_robin_quantum_required() {
        let params = StrategyParams::new();
        assert!(params.round_robin_quantum().is_err());
        assert!(params.validate_for(StrategyKind::RoundRobin).is_err());

        let params = StrategyParams::new().with_time_quantum(0);
        assert!(params.round_robin_quantum().is_err());

        let params = StrategyParams::new().with_time_quantum(3);
        assert_eq!(params.round_robin_quantum().unwrap(), 3);
    }

    #[test]
    fn test_mlfq_quanta_defaults_and_validation() {
        assert_eq!(
            StrategyParams::new().mlfq_quanta().unwrap(),
            DEFAULT_LEVEL_QUANTA.to_vec()
        );
        assert!(StrategyParams::new()
            .with_level_quanta(vec![])
            .mlfq_quanta()
            .is_err());
        assert!(StrategyParams::new()
            .with_level_quanta(vec![2, 0])
            .mlfq_quanta()
            .is_err());
        assert_eq!(
            StrategyParams::new()
                .with_level_quanta(vec![1, 2])
                .mlfq_quanta()
                .unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_params_serde_defaults() {
        let params: StrategyParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, StrategyParams::default());
        assert!(params.preemptive_priority);

        let params: StrategyParams =
            serde_json::from_str(r#"{"timeQuantum":4,"preemptivePriority":false}"#).unwrap();
        assert_eq!(params.time_quantum, Some(4));
        assert!(!params.preemptive_priority);
    }
}
