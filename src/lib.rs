//! CPU scheduling simulator.
//!
//! Simulates classic single-CPU dispatch policies over a user-defined
//! process set, producing a merged execution timeline (Gantt chart) and
//! per-process plus averaged performance metrics. The engine is
//! deterministic and caller-driven: a simulation advances strictly
//! tick-by-tick, either all at once or one step at a time, with both
//! modes guaranteed to produce identical output.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessSpec`, `ProcessRun`,
//!   `GanttChart`, `GanttSegment`, `StrategyKind`, `StrategyParams`
//! - **`validation`**: Input integrity checks (duplicate IDs, arrival
//!   and burst ranges)
//! - **`session`**: The stateful simulation session, session store,
//!   and result metrics
//! - **`error`**: Error taxonomy (validation, configuration, invalid
//!   state)
//!
//! # Policies
//!
//! FCFS, SJF (non-preemptive), SRTF (preemptive SJF), Round Robin,
//! Priority (preemptive or not), and Multilevel Feedback Queue.
//!
//! # Example
//!
//! ```
//! use cpusim::models::{ProcessSpec, StrategyKind, StrategyParams};
//! use cpusim::session::simulate;
//!
//! let processes = vec![
//!     ProcessSpec::new("P1", 0, 5),
//!     ProcessSpec::new("P2", 1, 3),
//! ];
//! let report = simulate(processes, StrategyKind::Fcfs, StrategyParams::new()).unwrap();
//!
//! assert_eq!(report.segments.len(), 2);
//! assert_eq!(report.summary.avg_waiting_time, 2.0);
//! assert_eq!(report.summary.avg_turnaround_time, 6.0);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2015), "Modern Operating Systems", Ch. 2.4

pub mod error;
pub mod models;
pub mod session;
pub mod validation;

mod policy;
