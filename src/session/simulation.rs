//! Stateful simulation session.
//!
//! A session holds one in-progress simulation: the run-time process
//! table, the active policy with its queues, the tick counter, and the
//! timeline built so far. It moves through three lifecycle states:
//!
//! ```text
//! Configured --step()--> Running --last completion--> Completed
//! ```
//!
//! `run_to_completion` is implemented as repeated `step` calls, so the
//! full-run and step-wise modes produce identical segment output by
//! construction.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{
    pastel_color, CpuSlot, GanttChart, GanttSegment, ProcessRun, ProcessSpec, StrategyKind,
    StrategyParams,
};
use crate::policy::Policy;
use crate::validation::validate_processes;

use super::metrics::{MetricsSummary, ProcessMetrics};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// Configured, no ticks executed yet.
    Configured,
    /// At least one tick executed, not all processes complete.
    Running,
    /// Every process has finished. Terminal.
    Completed,
}

/// One entry of the ready queue in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyProcess {
    /// Process identifier.
    pub id: String,
    /// CPU ticks still required.
    pub remaining_time: i64,
    /// Current MLFQ level (0 outside MLFQ).
    pub queue_level: usize,
}

/// Read-only projection of a session's intermediate state.
///
/// Used by callers (UI layers, transports) to render progress without
/// mutating the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Next tick to be simulated.
    pub current_tick: i64,
    /// Lifecycle state.
    pub state: SessionState,
    /// Id of the process holding the CPU, if any.
    pub running_process: Option<String>,
    /// Ready processes in dispatch order (running process excluded).
    pub ready_queue: Vec<ReadyProcess>,
    /// Timeline segments recorded so far.
    pub segments: Vec<GanttSegment>,
    /// Whether the simulation has finished.
    pub is_complete: bool,
}

/// Final output of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// The policy that produced this run.
    pub strategy: StrategyKind,
    /// The full merged timeline.
    pub segments: Vec<GanttSegment>,
    /// Per-process metrics, in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Averages across all processes.
    pub summary: MetricsSummary,
}

/// A stateful, caller-driven scheduling simulation.
///
/// All operations are synchronous and never block on I/O. A session is
/// single-threaded by design; concurrent callers must serialize access
/// (one mutating operation in flight at a time).
pub struct SimulationSession {
    specs: Vec<ProcessSpec>,
    kind: StrategyKind,
    params: StrategyParams,
    procs: Vec<ProcessRun>,
    policy: Policy,
    gantt: GanttChart,
    tick: i64,
    state: SessionState,
    completed: usize,
}

impl SimulationSession {
    /// Configures a new session from process definitions, a policy, and
    /// its parameters.
    ///
    /// Fails when the process set is invalid (empty, duplicate ids, bad
    /// arrival/burst values) or a policy-required parameter is missing
    /// or out of range.
    pub fn configure(
        specs: Vec<ProcessSpec>,
        kind: StrategyKind,
        params: StrategyParams,
    ) -> Result<Self, SimulationError> {
        validate_processes(&specs)?;
        params.validate_for(kind)?;
        let policy = Policy::new(kind, &params)?;

        let mut rng = rand::rng();
        let procs = specs
            .iter()
            .map(|s| s.start_run(pastel_color(&mut rng)))
            .collect();

        Ok(Self {
            specs,
            kind,
            params,
            procs,
            policy,
            gantt: GanttChart::new(),
            tick: 0,
            state: SessionState::Configured,
            completed: 0,
        })
    }

    /// Like [`configure`](Self::configure), but resolves the policy from
    /// its wire name (`"FCFS"`, `"ROUND_ROBIN"`, ...).
    pub fn configure_by_name(
        specs: Vec<ProcessSpec>,
        strategy_name: &str,
        params: StrategyParams,
    ) -> Result<Self, SimulationError> {
        let kind = strategy_name.parse::<StrategyKind>()?;
        Self::configure(specs, kind, params)
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// Admits the tick's arrivals, lets the policy select a process (or
    /// idle), executes one tick of it, and records the timeline. Returns
    /// the post-tick snapshot.
    ///
    /// Fails with an invalid-state error once the session is completed.
    pub fn step(&mut self) -> Result<SessionSnapshot, SimulationError> {
        if self.state == SessionState::Completed {
            return Err(SimulationError::InvalidState(
                "step called on a completed simulation".to_string(),
            ));
        }

        let tick = self.tick;
        for idx in 0..self.procs.len() {
            if self.procs[idx].arrival_time == tick {
                self.policy.admit(idx, &self.procs);
            }
        }

        match self.policy.select(&self.procs) {
            None => self.gantt.record(tick, CpuSlot::Idle),
            Some(idx) => {
                self.gantt
                    .record(tick, CpuSlot::Process(self.procs[idx].id.clone()));
                self.policy.advance(&mut self.procs, tick);
                if self.procs[idx].is_complete() {
                    self.completed += 1;
                }
            }
        }

        self.tick = tick + 1;
        self.state = if self.completed == self.procs.len() {
            SessionState::Completed
        } else {
            SessionState::Running
        };
        Ok(self.snapshot())
    }

    /// Steps until every process has completed, then returns the final
    /// report.
    ///
    /// Produces segment output identical to driving the same session
    /// with individual [`step`](Self::step) calls.
    pub fn run_to_completion(&mut self) -> Result<SimulationReport, SimulationError> {
        while self.state != SessionState::Completed {
            self.step()?;
        }
        self.report()
    }

    /// Discards all run-time state and returns to `Configured`, with
    /// processes restored from their original definitions.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.policy = Policy::new(self.kind, &self.params)?;
        let mut rng = rand::rng();
        self.procs = self
            .specs
            .iter()
            .map(|s| s.start_run(pastel_color(&mut rng)))
            .collect();
        self.gantt.clear();
        self.tick = 0;
        self.completed = 0;
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Read-only projection of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let ready_queue = self
            .policy
            .ready_order(&self.procs)
            .into_iter()
            .map(|idx| {
                let p = &self.procs[idx];
                ReadyProcess {
                    id: p.id.clone(),
                    remaining_time: p.remaining_time,
                    queue_level: p.queue_level,
                }
            })
            .collect();

        SessionSnapshot {
            current_tick: self.tick,
            state: self.state,
            running_process: self.policy.running().map(|idx| self.procs[idx].id.clone()),
            ready_queue,
            segments: self.gantt.segments().to_vec(),
            is_complete: self.state == SessionState::Completed,
        }
    }

    /// Final report: segments, per-process metrics, and averages.
    ///
    /// Fails unless the session has completed.
    pub fn report(&self) -> Result<SimulationReport, SimulationError> {
        if self.state != SessionState::Completed {
            return Err(SimulationError::InvalidState(
                "report requires a completed simulation".to_string(),
            ));
        }
        let processes = self
            .procs
            .iter()
            .map(ProcessMetrics::from_run)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                SimulationError::InvalidState(
                    "completed session has a process without completion data".to_string(),
                )
            })?;
        let summary = MetricsSummary::calculate(&processes);
        Ok(SimulationReport {
            strategy: self.kind,
            segments: self.gantt.segments().to_vec(),
            processes,
            summary,
        })
    }

    /// The selected policy.
    pub fn strategy(&self) -> StrategyKind {
        self.kind
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Next tick to be simulated.
    pub fn current_tick(&self) -> i64 {
        self.tick
    }

    /// Whether every process has completed.
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }
}

/// Configures a session, drives it to completion, and returns the
/// report. The session is discarded afterwards.
pub fn simulate(
    specs: Vec<ProcessSpec>,
    kind: StrategyKind,
    params: StrategyParams,
) -> Result<SimulationReport, SimulationError> {
    let mut session = SimulationSession::configure(specs, kind, params)?;
    session.run_to_completion()
}
