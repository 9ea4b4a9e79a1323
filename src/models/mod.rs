//! Simulation domain models.
//!
//! Core value types for describing a CPU scheduling problem and its
//! result: process definitions and run-time state, the Gantt timeline,
//! and strategy selection/parameters.
//!
//! All types at this boundary serialize to flat structured records so
//! any transport layer (HTTP, CLI, files) can carry them.

mod gantt;
mod process;
mod strategy;

pub use gantt::{CpuSlot, GanttChart, GanttSegment, IDLE_COLOR, IDLE_ID};
pub use process::{pastel_color, ProcessRun, ProcessSpec};
pub use strategy::{StrategyKind, StrategyParams, DEFAULT_LEVEL_QUANTA};
