//! Scheduling policy implementations.
//!
//! One tagged variant per algorithm, each owning its own queue state,
//! behind a shared `select`/`advance` interface. The policy set is
//! closed, so a match over the variants is used instead of an open
//! trait hierarchy.
//!
//! # Conventions
//!
//! - Processes are referred to by index into the session's run table;
//!   index order is input order and serves as the final tie-breaker.
//! - Arrivals for tick *t* are admitted before `select` runs at *t*,
//!   so preemptive policies preempt at the arrival tick.
//! - Comparison keys use strict ordering: FCFS (arrival, index),
//!   SJF (burst, arrival, index), SRTF (remaining, arrival, index),
//!   Priority (priority, arrival, index).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use std::collections::VecDeque;

use crate::error::SimulationError;
use crate::models::{ProcessRun, StrategyKind, StrategyParams};

/// Ordering key: the process with the smallest key runs first.
type DispatchKey = (i64, i64, usize);

fn sjf_key(p: &ProcessRun, idx: usize) -> DispatchKey {
    (p.burst_time, p.arrival_time, idx)
}

fn srtf_key(p: &ProcessRun, idx: usize) -> DispatchKey {
    (p.remaining_time, p.arrival_time, idx)
}

fn priority_key(p: &ProcessRun, idx: usize) -> DispatchKey {
    (p.priority, p.arrival_time, idx)
}

/// A scheduling policy with its run-time queue state.
///
/// Indices refer to the session's process run table.
pub(crate) enum Policy {
    /// First Come First Served: FIFO by arrival, runs to completion.
    Fcfs {
        ready: VecDeque<usize>,
        running: Option<usize>,
    },
    /// Shortest Job First: picks the minimum burst among eligible
    /// processes, then runs it to completion.
    SjfNonPreemptive {
        ready: Vec<usize>,
        running: Option<usize>,
    },
    /// Shortest Remaining Time First: re-evaluates every tick and
    /// preempts when a strictly shorter remaining time appears.
    SjfPreemptive {
        ready: Vec<usize>,
        running: Option<usize>,
    },
    /// Round Robin: FIFO with a fixed per-selection time quantum.
    RoundRobin {
        ready: VecDeque<usize>,
        running: Option<usize>,
        quantum: i64,
        slice_used: i64,
    },
    /// Priority scheduling, preemptive or not (lower value wins).
    Priority {
        ready: Vec<usize>,
        running: Option<usize>,
        preemptive: bool,
    },
    /// Multilevel Feedback Queue: strict priority across levels,
    /// Round Robin within a level, demotion on quantum expiry.
    Mlfq {
        levels: Vec<VecDeque<usize>>,
        quanta: Vec<i64>,
        running: Option<usize>,
        slice_used: i64,
    },
}

impl Policy {
    /// Builds the policy for `kind`, validating its required parameters.
    pub(crate) fn new(kind: StrategyKind, params: &StrategyParams) -> Result<Self, SimulationError> {
        Ok(match kind {
            StrategyKind::Fcfs => Policy::Fcfs {
                ready: VecDeque::new(),
                running: None,
            },
            StrategyKind::SjfNp => Policy::SjfNonPreemptive {
                ready: Vec::new(),
                running: None,
            },
            StrategyKind::SjfP => Policy::SjfPreemptive {
                ready: Vec::new(),
                running: None,
            },
            StrategyKind::RoundRobin => Policy::RoundRobin {
                ready: VecDeque::new(),
                running: None,
                quantum: params.round_robin_quantum()?,
                slice_used: 0,
            },
            StrategyKind::Priority => Policy::Priority {
                ready: Vec::new(),
                running: None,
                preemptive: params.preemptive_priority,
            },
            StrategyKind::Mlfq => {
                let quanta = params.mlfq_quanta()?;
                Policy::Mlfq {
                    levels: vec![VecDeque::new(); quanta.len()],
                    quanta,
                    running: None,
                    slice_used: 0,
                }
            }
        })
    }

    /// Admits a newly arrived process into the ready structure.
    pub(crate) fn admit(&mut self, idx: usize, procs: &[ProcessRun]) {
        match self {
            Policy::Fcfs { ready, .. } | Policy::RoundRobin { ready, .. } => ready.push_back(idx),
            Policy::SjfNonPreemptive { ready, .. }
            | Policy::SjfPreemptive { ready, .. }
            | Policy::Priority { ready, .. } => ready.push(idx),
            Policy::Mlfq { levels, .. } => levels[procs[idx].queue_level].push_back(idx),
        }
    }

    /// Picks the process to run at the current tick, or `None` if no
    /// process is eligible (idle CPU). Applies preemption rules.
    pub(crate) fn select(&mut self, procs: &[ProcessRun]) -> Option<usize> {
        match self {
            Policy::Fcfs { ready, running } => {
                if running.is_none() {
                    *running = ready.pop_front();
                }
                *running
            }
            Policy::SjfNonPreemptive { ready, running } => {
                if running.is_none() {
                    *running = take_best(ready, procs, sjf_key);
                }
                *running
            }
            Policy::SjfPreemptive { ready, running } => {
                select_preemptive(ready, running, procs, srtf_key);
                *running
            }
            Policy::RoundRobin {
                ready,
                running,
                slice_used,
                ..
            } => {
                if running.is_none() {
                    *running = ready.pop_front();
                    *slice_used = 0;
                }
                *running
            }
            Policy::Priority {
                ready,
                running,
                preemptive,
            } => {
                if *preemptive {
                    select_preemptive(ready, running, procs, priority_key);
                } else if running.is_none() {
                    *running = take_best(ready, procs, priority_key);
                }
                *running
            }
            Policy::Mlfq {
                levels,
                running,
                slice_used,
                ..
            } => {
                // Preemption by a higher-priority level: the running
                // process goes back to its own level, behind its peers.
                if let Some(r) = *running {
                    let level = procs[r].queue_level;
                    if levels[..level].iter().any(|q| !q.is_empty()) {
                        levels[level].push_back(r);
                        *running = None;
                    }
                }
                if running.is_none() {
                    if let Some(level) = levels.iter().position(|q| !q.is_empty()) {
                        *running = levels[level].pop_front();
                        *slice_used = 0;
                    }
                }
                *running
            }
        }
    }

    /// Executes one tick for the currently selected process: records the
    /// first run, decrements the remaining burst, marks completion, and
    /// applies policy-specific re-queueing (quantum expiry, demotion).
    ///
    /// # Panics
    /// Panics if no process is selected or the selected process is
    /// already complete; either indicates a policy bug.
    pub(crate) fn advance(&mut self, procs: &mut [ProcessRun], tick: i64) {
        let idx = match self.running() {
            Some(idx) => idx,
            None => panic!("advance called with no running process"),
        };
        let p = &mut procs[idx];
        assert!(p.remaining_time > 0, "completed process selected to run");
        if p.first_run_time.is_none() {
            p.first_run_time = Some(tick);
        }
        p.remaining_time -= 1;
        let finished = p.remaining_time == 0;
        if finished {
            debug_assert!(p.completion_time.is_none(), "completion time set twice");
            p.completion_time = Some(tick + 1);
        }

        match self {
            Policy::Fcfs { running, .. }
            | Policy::SjfNonPreemptive { running, .. }
            | Policy::SjfPreemptive { running, .. }
            | Policy::Priority { running, .. } => {
                if finished {
                    *running = None;
                }
            }
            Policy::RoundRobin {
                ready,
                running,
                quantum,
                slice_used,
            } => {
                if finished {
                    *running = None;
                    *slice_used = 0;
                } else {
                    *slice_used += 1;
                    if *slice_used == *quantum {
                        // Expired: behind everything that arrived during
                        // the slice.
                        ready.push_back(idx);
                        *running = None;
                        *slice_used = 0;
                    }
                }
            }
            Policy::Mlfq {
                levels,
                quanta,
                running,
                slice_used,
            } => {
                if finished {
                    *running = None;
                    *slice_used = 0;
                } else {
                    *slice_used += 1;
                    let level = procs[idx].queue_level;
                    if *slice_used == quanta[level] {
                        // Quantum exhausted: demote, clamped at the
                        // lowest level.
                        let next = (level + 1).min(quanta.len() - 1);
                        procs[idx].queue_level = next;
                        levels[next].push_back(idx);
                        *running = None;
                        *slice_used = 0;
                    }
                }
            }
        }
    }

    /// The currently selected process, if any.
    pub(crate) fn running(&self) -> Option<usize> {
        match self {
            Policy::Fcfs { running, .. }
            | Policy::SjfNonPreemptive { running, .. }
            | Policy::SjfPreemptive { running, .. }
            | Policy::RoundRobin { running, .. }
            | Policy::Priority { running, .. }
            | Policy::Mlfq { running, .. } => *running,
        }
    }

    /// Ready processes in dispatch order (the order the policy would
    /// run them if nothing else changed). Excludes the running process.
    pub(crate) fn ready_order(&self, procs: &[ProcessRun]) -> Vec<usize> {
        match self {
            Policy::Fcfs { ready, .. } | Policy::RoundRobin { ready, .. } => {
                ready.iter().copied().collect()
            }
            Policy::SjfNonPreemptive { ready, .. } => sorted_by_key(ready, procs, sjf_key),
            Policy::SjfPreemptive { ready, .. } => sorted_by_key(ready, procs, srtf_key),
            Policy::Priority { ready, .. } => sorted_by_key(ready, procs, priority_key),
            Policy::Mlfq { levels, .. } => {
                levels.iter().flat_map(|q| q.iter().copied()).collect()
            }
        }
    }
}

/// Removes and returns the ready process with the smallest key.
fn take_best(
    ready: &mut Vec<usize>,
    procs: &[ProcessRun],
    key: fn(&ProcessRun, usize) -> DispatchKey,
) -> Option<usize> {
    let pos = ready
        .iter()
        .enumerate()
        .min_by_key(|&(_, &idx)| key(&procs[idx], idx))
        .map(|(pos, _)| pos)?;
    Some(ready.remove(pos))
}

/// Preemptive selection: the best candidate among ready and running
/// takes the CPU; a displaced running process rejoins the ready pool.
///
/// A strict comparison means an incoming process with an equal key never
/// displaces the running one.
fn select_preemptive(
    ready: &mut Vec<usize>,
    running: &mut Option<usize>,
    procs: &[ProcessRun],
    key: fn(&ProcessRun, usize) -> DispatchKey,
) {
    let best_pos = ready
        .iter()
        .enumerate()
        .min_by_key(|&(_, &idx)| key(&procs[idx], idx))
        .map(|(pos, _)| pos);
    let Some(pos) = best_pos else { return };

    match *running {
        None => *running = Some(ready.remove(pos)),
        Some(current) => {
            let challenger = ready[pos];
            if key(&procs[challenger], challenger) < key(&procs[current], current) {
                ready.push(current);
                *running = Some(ready.remove(pos));
            }
        }
    }
}

fn sorted_by_key(
    ready: &[usize],
    procs: &[ProcessRun],
    key: fn(&ProcessRun, usize) -> DispatchKey,
) -> Vec<usize> {
    let mut order: Vec<usize> = ready.to_vec();
    order.sort_by_key(|&idx| key(&procs[idx], idx));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn runs(specs: &[(&str, i64, i64, i64)]) -> Vec<ProcessRun> {
        specs
            .iter()
            .map(|&(id, arrival, burst, priority)| {
                ProcessSpec::new(id, arrival, burst)
                    .with_priority(priority)
                    .start_run("#ffffff")
            })
            .collect()
    }

    fn policy(kind: StrategyKind, params: StrategyParams) -> Policy {
        Policy::new(kind, &params).unwrap()
    }

    #[test]
    fn test_fcfs_runs_to_completion() {
        let mut procs = runs(&[("A", 0, 2, 0), ("B", 0, 1, 0)]);
        let mut p = policy(StrategyKind::Fcfs, StrategyParams::new());
        p.admit(0, &procs);
        p.admit(1, &procs);

        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);
        // A not finished: stays selected even though B is waiting.
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 1);
        assert!(procs[0].is_complete());
        assert_eq!(procs[0].completion_time, Some(2));
        assert_eq!(p.select(&procs), Some(1));
    }

    #[test]
    fn test_sjf_np_picks_shortest_but_never_preempts() {
        let mut procs = runs(&[("long", 0, 5, 0), ("short", 0, 1, 0)]);
        let mut p = policy(StrategyKind::SjfNp, StrategyParams::new());
        p.admit(0, &procs);
        p.admit(1, &procs);

        assert_eq!(p.select(&procs), Some(1));
        p.advance(&mut procs, 0);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 1);

        // A shorter arrival mid-burst does not displace the running one.
        let mut procs = runs(&[("long", 0, 5, 0), ("short", 1, 1, 0)]);
        let mut p = policy(StrategyKind::SjfNp, StrategyParams::new());
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);
        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(0));
    }

    #[test]
    fn test_srtf_preempts_on_strictly_smaller_remaining() {
        let mut procs = runs(&[("A", 0, 8, 0), ("B", 1, 4, 0)]);
        let mut p = policy(StrategyKind::SjfP, StrategyParams::new());
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);

        p.admit(1, &procs);
        // B's 4 < A's remaining 7.
        assert_eq!(p.select(&procs), Some(1));
        assert_eq!(p.ready_order(&procs), vec![0]);
    }

    #[test]
    fn test_srtf_no_preemption_on_equal_remaining() {
        let mut procs = runs(&[("A", 0, 4, 0), ("B", 1, 3, 0)]);
        let mut p = policy(StrategyKind::SjfP, StrategyParams::new());
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);

        // A remaining 3 == B burst 3: A keeps the CPU (earlier arrival).
        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(0));
    }

    #[test]
    fn test_round_robin_expiry_requeues_behind_arrivals() {
        let mut procs = runs(&[("A", 0, 5, 0), ("B", 1, 3, 0)]);
        let mut p = policy(
            StrategyKind::RoundRobin,
            StrategyParams::new().with_time_quantum(2),
        );
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);
        p.admit(1, &procs); // B arrives during A's slice
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 1); // A's quantum expires

        // Queue is now [B, A].
        assert_eq!(p.running(), None);
        assert_eq!(p.ready_order(&procs), vec![1, 0]);
        assert_eq!(p.select(&procs), Some(1));
    }

    #[test]
    fn test_round_robin_completion_within_quantum() {
        let mut procs = runs(&[("A", 0, 1, 0), ("B", 0, 2, 0)]);
        let mut p = policy(
            StrategyKind::RoundRobin,
            StrategyParams::new().with_time_quantum(4),
        );
        p.admit(0, &procs);
        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);
        assert_eq!(procs[0].completion_time, Some(1));
        assert_eq!(p.select(&procs), Some(1));
    }

    #[test]
    fn test_priority_preemptive() {
        let mut procs = runs(&[("low", 0, 5, 5), ("high", 1, 2, 1)]);
        let mut p = policy(StrategyKind::Priority, StrategyParams::new());
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);

        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(1));
    }

    #[test]
    fn test_priority_non_preemptive_keeps_running() {
        let mut procs = runs(&[("low", 0, 5, 5), ("high", 1, 2, 1)]);
        let mut p = policy(
            StrategyKind::Priority,
            StrategyParams::new().non_preemptive_priority(),
        );
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0);

        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(0));
    }

    #[test]
    fn test_mlfq_demotes_on_quantum_expiry() {
        let mut procs = runs(&[("A", 0, 6, 0)]);
        let mut p = policy(
            StrategyKind::Mlfq,
            StrategyParams::new().with_level_quanta(vec![1, 2]),
        );
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0); // level 0 quantum (1) exhausted
        assert_eq!(procs[0].queue_level, 1);

        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 1);
        p.advance(&mut procs, 2); // level 1 quantum (2) exhausted
        // Clamped at the lowest level.
        assert_eq!(procs[0].queue_level, 1);
    }

    #[test]
    fn test_mlfq_arrival_preemption_keeps_level() {
        let mut procs = runs(&[("A", 0, 6, 0), ("B", 2, 1, 0)]);
        let mut p = policy(
            StrategyKind::Mlfq,
            StrategyParams::new().with_level_quanta(vec![1, 4]),
        );
        p.admit(0, &procs);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 0); // demoted to level 1
        assert_eq!(procs[0].queue_level, 1);
        assert_eq!(p.select(&procs), Some(0));
        p.advance(&mut procs, 1);

        // B arrives at level 0 and preempts; A stays at level 1.
        p.admit(1, &procs);
        assert_eq!(p.select(&procs), Some(1));
        assert_eq!(procs[0].queue_level, 1);
        p.advance(&mut procs, 2);
        assert!(procs[1].is_complete());

        assert_eq!(p.select(&procs), Some(0));
    }

    #[test]
    fn test_select_none_when_no_process_eligible() {
        let procs = runs(&[("A", 5, 1, 0)]);
        for kind in StrategyKind::ALL {
            let params = StrategyParams::new().with_time_quantum(2);
            let mut p = policy(kind, params);
            assert_eq!(p.select(&procs), None, "{kind} should be idle");
        }
    }

    #[test]
    #[should_panic(expected = "no running process")]
    fn test_advance_without_selection_panics() {
        let mut procs = runs(&[("A", 5, 1, 0)]);
        let mut p = policy(StrategyKind::Fcfs, StrategyParams::new());
        p.advance(&mut procs, 0);
    }
}
