//! Observer port - abstraction for trial observation and data collection
//!
//! This port defines the interface for observing harness events, allowing
//! composable data collection without coupling the trial loop to specific
//! output formats.

use crate::{
    Result,
    pipeline::training::{RunSummary, StepRecord, TrialRecord},
};

/// Observer trait for monitoring a run of trials
///
/// # Event Sequence
///
/// 1. `on_run_start(expected_trials)` - Once at the beginning
/// 2. For each trial:
///    - `on_trial_start(trial, testing)`
///    - `on_step(...)` - For each step the agent takes
///    - `on_trial_end(record)`
/// 3. `on_run_end(summary)` - Once at the end
///
/// `expected_trials` is a hint: in learning mode the number of training
/// trials depends on the exploration schedule.
///
/// # Examples
///
/// ```no_run
/// use smartcab::{pipeline::TrialRecord, ports::Observer};
///
/// struct ArrivalCounter {
///     arrivals: usize,
/// }
///
/// impl Observer for ArrivalCounter {
///     fn on_trial_end(&mut self, record: &TrialRecord) -> smartcab::Result<()> {
///         if record.outcome.is_success() {
///             self.arrivals += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first trial.
    fn on_run_start(&mut self, _expected_trials: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a trial starts. `trial` is 1-based and counts across phases.
    fn on_trial_start(&mut self, _trial: usize, _testing: bool) -> Result<()> {
        Ok(())
    }

    /// Called after each step, once the reward is known and learning applied.
    fn on_step(&mut self, _step: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when a trial ends.
    fn on_trial_end(&mut self, _record: &TrialRecord) -> Result<()> {
        Ok(())
    }

    /// Called once after the last trial.
    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}
