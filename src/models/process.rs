//! Process model.
//!
//! A process is a unit of CPU work with an arrival time, a total burst,
//! and an optional priority. User-entered definitions (`ProcessSpec`) are
//! immutable; a simulation operates on run-time clones (`ProcessRun`) so
//! that repeated and step-wise runs against the same input are idempotent.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A user-entered process definition.
///
/// All times are in simulated ticks. `priority` follows the convention
/// lower value = higher priority and is only consulted by the Priority
/// and MLFQ policies; it defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes eligible to run (>= 0).
    pub arrival_time: i64,
    /// Total CPU ticks required (> 0).
    pub burst_time: i64,
    /// Scheduling priority (lower = more important).
    #[serde(default)]
    pub priority: i64,
}

impl ProcessSpec {
    /// Creates a process definition with default priority.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority (lower = more important).
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Creates a fresh run-time clone of this definition.
    ///
    /// The clone carries all mutable execution state (`remaining_time`,
    /// `first_run_time`, `completion_time`, `queue_level`) reset to its
    /// initial values; the definition itself is never mutated by a run.
    pub fn start_run(&self, color: impl Into<String>) -> ProcessRun {
        ProcessRun {
            id: self.id.clone(),
            arrival_time: self.arrival_time,
            burst_time: self.burst_time,
            priority: self.priority,
            remaining_time: self.burst_time,
            queue_level: 0,
            first_run_time: None,
            completion_time: None,
            color: color.into(),
        }
    }
}

/// Run-time execution state of one process within a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRun {
    /// Identifier, copied from the definition.
    pub id: String,
    /// Arrival tick, copied from the definition.
    pub arrival_time: i64,
    /// Original total burst, copied from the definition.
    pub burst_time: i64,
    /// Priority, copied from the definition.
    pub priority: i64,
    /// CPU ticks still required; always in `[0, burst_time]`.
    pub remaining_time: i64,
    /// Current MLFQ level (0 = highest). Unused by other policies.
    pub queue_level: usize,
    /// First tick the process held the CPU. Set once.
    pub first_run_time: Option<i64>,
    /// Tick at which `remaining_time` reached 0. Set once.
    pub completion_time: Option<i64>,
    /// Display color for timeline rendering.
    pub color: String,
}

impl ProcessRun {
    /// Whether the process has finished executing.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Turnaround time: completion - arrival. `None` until complete.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Waiting time: turnaround - burst. `None` until complete.
    pub fn waiting_time(&self) -> Option<i64> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// Response time: first CPU tick - arrival. `None` until first run.
    pub fn response_time(&self) -> Option<i64> {
        self.first_run_time.map(|f| f - self.arrival_time)
    }
}

/// Generates a random pastel hex color for timeline rendering.
///
/// Channels are drawn from 150..=255 so process segments stay light
/// enough for dark overlay text.
pub fn pastel_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let r: u8 = rng.random_range(150..=255);
    let g: u8 = rng.random_range(150..=255);
    let b: u8 = rng.random_range(150..=255);
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = ProcessSpec::new("P1", 2, 7).with_priority(3);
        assert_eq!(spec.id, "P1");
        assert_eq!(spec.arrival_time, 2);
        assert_eq!(spec.burst_time, 7);
        assert_eq!(spec.priority, 3);
    }

    #[test]
    fn test_default_priority() {
        assert_eq!(ProcessSpec::new("P1", 0, 1).priority, 0);
    }

    #[test]
    fn test_start_run_resets_state() {
        let spec = ProcessSpec::new("P1", 1, 4);
        let run = spec.start_run("#aabbcc");
        assert_eq!(run.remaining_time, 4);
        assert_eq!(run.queue_level, 0);
        assert_eq!(run.first_run_time, None);
        assert_eq!(run.completion_time, None);
        assert!(!run.is_complete());
        assert_eq!(run.color, "#aabbcc");
    }

    #[test]
    fn test_derived_metrics() {
        let mut run = ProcessSpec::new("P1", 2, 3).start_run("#ffffff");
        assert_eq!(run.turnaround_time(), None);
        assert_eq!(run.response_time(), None);

        run.first_run_time = Some(4);
        run.remaining_time = 0;
        run.completion_time = Some(7);
        assert_eq!(run.turnaround_time(), Some(5));
        assert_eq!(run.waiting_time(), Some(2));
        assert_eq!(run.response_time(), Some(2));
    }

    #[test]
    fn test_spec_serde_wire_names() {
        let spec = ProcessSpec::new("P1", 0, 5).with_priority(2);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["arrivalTime"], 0);
        assert_eq!(json["burstTime"], 5);
        assert_eq!(json["priority"], 2);

        let parsed: ProcessSpec =
            serde_json::from_str(r#"{"id":"P2","arrivalTime":1,"burstTime":3}"#).unwrap();
        assert_eq!(parsed.priority, 0);
    }

    #[test]
    fn test_pastel_color_format() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let c = pastel_color(&mut rng);
            assert_eq!(c.len(), 7);
            assert!(c.starts_with('#'));
            let r = u8::from_str_radix(&c[1..3], 16).unwrap();
            assert!(r >= 150);
        }
    }
}
