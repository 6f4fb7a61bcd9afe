//! Driven-trial harness
//!
//! This module provides:
//! - Exploration schedules for training trials
//! - A trial runner that trains, then tests, an agent against an environment
//! - Observers recording what happens during a run

pub mod observers;
pub mod schedule;
pub mod training;

pub use observers::{JsonlObserver, ProgressObserver, TracingObserver, TrialObservation};
pub use schedule::ExplorationSchedule;
pub use training::{
    RunConfig, RunSummary, StepRecord, TrialOutcome, TrialRecord, TrialRunner, TrialStats,
};

pub use crate::ports::Observer;
