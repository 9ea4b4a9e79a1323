//! Performance metrics.
//!
//! Derives the standard per-process indicators from final completion
//! data, plus their arithmetic means across the process set.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first CPU tick - arrival |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::models::ProcessRun;

/// Final metrics for one completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Arrival tick, from the definition.
    pub arrival_time: i64,
    /// Total burst, from the definition.
    pub burst_time: i64,
    /// Priority, from the definition.
    pub priority: i64,
    /// Tick at which the process finished.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst.
    pub waiting_time: i64,
    /// First CPU tick - arrival.
    pub response_time: i64,
    /// Display color carried through for renderers.
    pub color: String,
}

impl ProcessMetrics {
    /// Derives metrics from a run, or `None` if it has not completed.
    pub fn from_run(run: &ProcessRun) -> Option<Self> {
        Some(Self {
            id: run.id.clone(),
            arrival_time: run.arrival_time,
            burst_time: run.burst_time,
            priority: run.priority,
            completion_time: run.completion_time?,
            turnaround_time: run.turnaround_time()?,
            waiting_time: run.waiting_time()?,
            response_time: run.response_time()?,
            color: run.color.clone(),
        })
    }
}

/// Averaged metrics across all processes of a run.
///
/// Values are rounded to 3 decimals. An empty input yields zeroes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
}

impl MetricsSummary {
    /// Computes the three averages from per-process metrics.
    pub fn calculate(processes: &[ProcessMetrics]) -> Self {
        if processes.is_empty() {
            return Self::default();
        }
        let n = processes.len() as f64;
        let sum = |f: fn(&ProcessMetrics) -> i64| processes.iter().map(f).sum::<i64>() as f64;
        Self {
            avg_waiting_time: round3(sum(|p| p.waiting_time) / n),
            avg_turnaround_time: round3(sum(|p| p.turnaround_time) / n),
            avg_response_time: round3(sum(|p| p.response_time) / n),
        }
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
