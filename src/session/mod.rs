//! Simulation sessions and result metrics.
//!
//! The session is the stateful core of the crate: it owns one
//! in-progress simulation and exposes full-run and step-wise execution
//! over the same code path, so both modes produce identical timelines.
//!
//! # Usage
//!
//! ```
//! use cpusim::models::{ProcessSpec, StrategyKind, StrategyParams};
//! use cpusim::session::SimulationSession;
//!
//! let mut session = SimulationSession::configure(
//!     vec![ProcessSpec::new("P1", 0, 3), ProcessSpec::new("P2", 1, 2)],
//!     StrategyKind::RoundRobin,
//!     StrategyParams::new().with_time_quantum(2),
//! ).unwrap();
//!
//! let snapshot = session.step().unwrap();
//! assert_eq!(snapshot.running_process.as_deref(), Some("P1"));
//!
//! let report = session.run_to_completion().unwrap();
//! assert!(report.summary.avg_waiting_time >= 0.0);
//! ```

mod metrics;
mod simulation;
mod store;

pub use metrics::{MetricsSummary, ProcessMetrics};
pub use simulation::{
    simulate, ReadyProcess, SessionSnapshot, SessionState, SimulationReport, SimulationSession,
};
pub use store::{SessionId, SessionStore};
