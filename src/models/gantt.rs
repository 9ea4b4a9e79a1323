//! Gantt timeline model.
//!
//! The timeline is a sequence of contiguous segments, each attributing an
//! interval of simulated time to one process or to an idle CPU. Segments
//! are built tick-by-tick and merged on the fly: recording the same slot
//! on consecutive ticks extends the open segment instead of appending a
//! new one, so a Round Robin run with quantum 1 still yields compact
//! segments.

use serde::{Deserialize, Serialize};

/// Wire sentinel for an idle CPU slot.
pub const IDLE_ID: &str = "IDLE";

/// Display color for idle segments.
pub const IDLE_COLOR: &str = "#ccc";

/// Occupant of the CPU during one segment: a process, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CpuSlot {
    /// A process, identified by its id.
    Process(String),
    /// No eligible process; the CPU sat idle.
    Idle,
}

impl CpuSlot {
    /// The process id, or `None` for idle.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            CpuSlot::Process(id) => Some(id),
            CpuSlot::Idle => None,
        }
    }
}

impl From<String> for CpuSlot {
    fn from(s: String) -> Self {
        if s == IDLE_ID {
            CpuSlot::Idle
        } else {
            CpuSlot::Process(s)
        }
    }
}

impl From<CpuSlot> for String {
    fn from(slot: CpuSlot) -> Self {
        match slot {
            CpuSlot::Process(id) => id,
            CpuSlot::Idle => IDLE_ID.to_string(),
        }
    }
}

/// A contiguous interval of simulated time attributed to one slot.
///
/// Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSegment {
    /// Occupant of the CPU for this interval.
    #[serde(rename = "id")]
    pub slot: CpuSlot,
    /// First tick of the interval (inclusive).
    pub start: i64,
    /// End of the interval (exclusive).
    pub end: i64,
}

impl GanttSegment {
    /// Segment length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// An ordered, gap-free sequence of Gantt segments.
///
/// Segments tile `[0, makespan())` exactly: ticks must be recorded in
/// order, one per call, and idle ticks are recorded explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    segments: Vec<GanttSegment>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one tick of CPU time for `slot`, merging into the last
    /// segment when the slot is unchanged.
    ///
    /// # Panics
    /// Panics if `tick` is not the next unrecorded tick; the engine must
    /// never leave holes in the timeline.
    pub fn record(&mut self, tick: i64, slot: CpuSlot) {
        assert_eq!(
            tick,
            self.makespan(),
            "gantt ticks must be recorded contiguously"
        );
        match self.segments.last_mut() {
            Some(last) if last.slot == slot => last.end = tick + 1,
            _ => self.segments.push(GanttSegment {
                slot,
                start: tick,
                end: tick + 1,
            }),
        }
    }

    /// The recorded segments, in chronological order.
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    /// End of the last recorded tick, or 0 for an empty chart.
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total CPU ticks attributed to the given process.
    pub fn busy_time(&self, process_id: &str) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.slot.process_id() == Some(process_id))
            .map(GanttSegment::duration)
            .sum()
    }

    /// Total idle ticks.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.slot == CpuSlot::Idle)
            .map(GanttSegment::duration)
            .sum()
    }

    /// Discards all recorded segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}
