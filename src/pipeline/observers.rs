//! Observer implementations for the trial harness
//!
//! Observers allow composable data collection during a run without coupling
//! the trial loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::training::{RunSummary, StepRecord, TrialRecord};
use crate::{Error, Result, ports::Observer};

/// Complete observation of one trial, written as a single JSON line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialObservation {
    #[serde(flatten)]
    pub record: TrialRecord,
    pub step_log: Vec<StepRecord>,
}

/// JSONL observer - one line per trial, steps included
pub struct JsonlObserver<W: Write + Send = BufWriter<File>> {
    writer: W,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a JSONL observer writing to a new file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create trial log {}", path.display()),
            source,
        })?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    /// Create a JSONL observer over any writer
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            current_steps: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_trial_start(&mut self, _trial: usize, _testing: bool) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, step: &StepRecord) -> Result<()> {
        self.current_steps.push(step.clone());
        Ok(())
    }

    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        let observation = TrialObservation {
            record: record.clone(),
            step_log: std::mem::take(&mut self.current_steps),
        };
        serde_json::to_writer(&mut self.writer, &observation)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Progress bar observer - shows trial progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    arrivals: usize,
    trials: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            arrivals: 0,
            trials: 0,
        }
    }

    fn message(&self) -> String {
        format!("arrived {}/{}", self.arrivals, self.trials)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, expected_trials: usize) -> Result<()> {
        let pb = ProgressBar::new(expected_trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        self.trials += 1;
        if record.outcome.is_success() {
            self.arrivals += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.trial as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self, _summary: &RunSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Tracing observer - structured log line per trial
#[derive(Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        info!(
            trial = record.trial,
            testing = record.testing,
            outcome = ?record.outcome,
            steps = record.steps,
            reward = record.total_reward,
            epsilon = record.epsilon,
            alpha = record.alpha,
            states = record.states,
            "trial"
        );
        Ok(())
    }

    fn on_run_end(&mut self, summary: &RunSummary) -> Result<()> {
        info!(
            training_trials = summary.training.trials,
            training_success_rate = summary.training.success_rate,
            testing_trials = summary.testing.trials,
            testing_success_rate = summary.testing.success_rate,
            states = summary.states_learned,
            "run summary"
        );
        Ok(())
    }
}
