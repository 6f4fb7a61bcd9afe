//! Driven-trial harness: training trials with a decaying ε, then testing trials

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::schedule::ExplorationSchedule;
use crate::{
    Error, Result,
    error::check_unit_interval,
    ports::{Environment, Observer, RandomSource, RoutePlanner, TrialStatus},
    q_learning::{Branch, LearningAgent, StepOutcome},
    state::State,
    types::Action,
};

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Training stops once the scheduled ε falls below this value
    pub tolerance: f64,

    /// Number of evaluation trials (ε = 0, α = 0)
    pub testing_trials: usize,

    /// Number of training trials when the agent is not learning
    pub baseline_trials: usize,

    /// Upper bound on learning-mode training trials
    pub max_training_trials: usize,

    /// Step cap per trial, in case the environment never terminates
    pub max_steps_per_trial: usize,

    /// ε schedule for training trials
    pub schedule: ExplorationSchedule,
}

impl RunConfig {
    /// Check tolerance, step cap and schedule.
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("tolerance", self.tolerance)?;
        if self.max_steps_per_trial == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps_per_trial must be at least 1".to_string(),
            });
        }
        self.schedule.validate()
    }

    /// ε values for each learning-mode training trial, in order.
    pub fn training_epsilons(&self, initial_epsilon: f64) -> Vec<f64> {
        (1..=self.max_training_trials)
            .map(|trial| self.schedule.epsilon(initial_epsilon, trial))
            .take_while(|&epsilon| epsilon >= self.tolerance)
            .collect()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            testing_trials: 10,
            baseline_trials: 20,
            max_training_trials: 500,
            max_steps_per_trial: 200,
            schedule: ExplorationSchedule::default(),
        }
    }
}

/// How a trial ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialOutcome {
    Arrived,
    DeadlineReached,
    /// The harness step cap ran out first
    StepLimit,
}

impl TrialOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, TrialOutcome::Arrived)
    }
}

/// One step as seen by observers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Trial number (1-based, across both phases)
    pub trial: usize,
    /// Step number within the trial (1-based)
    pub step: usize,
    /// Whether this is an evaluation trial
    pub testing: bool,
    pub state: State,
    pub action: Action,
    pub branch: Branch,
    pub reward: f64,
}

/// Result of a single trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub testing: bool,
    pub outcome: TrialOutcome,
    pub steps: usize,
    pub total_reward: f64,
    /// ε in force during the trial
    pub epsilon: f64,
    /// α in force during the trial
    pub alpha: f64,
    /// Q-table size at the end of the trial
    pub states: usize,
}

/// Aggregate statistics for one phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialStats {
    pub trials: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub mean_reward: f64,
    pub mean_steps: f64,
}

impl TrialStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TrialRecord>) -> Self {
        let mut stats = TrialStats::default();
        let mut reward = 0.0;
        let mut steps = 0usize;
        for record in records {
            stats.trials += 1;
            if record.outcome.is_success() {
                stats.successes += 1;
            }
            reward += record.total_reward;
            steps += record.steps;
        }
        if stats.trials > 0 {
            let n = stats.trials as f64;
            stats.success_rate = stats.successes as f64 / n;
            stats.mean_reward = reward / n;
            stats.mean_steps = steps as f64 / n;
        }
        stats
    }
}

/// Result of a full run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub training: TrialStats,
    pub testing: TrialStats,
    /// Q-table size after the run
    pub states_learned: usize,
    pub trials: Vec<TrialRecord>,
}

impl RunSummary {
    pub fn from_records(trials: Vec<TrialRecord>, states_learned: usize) -> Self {
        Self {
            training: TrialStats::from_records(trials.iter().filter(|r| !r.testing)),
            testing: TrialStats::from_records(trials.iter().filter(|r| r.testing)),
            states_learned,
            trials,
        }
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Runs an agent through training and testing trials
///
/// The harness, not the agent, owns the parameter schedule: it sets ε before
/// each training trial and switches to ε = 0, α = 0 for testing. Those
/// testing values stay on the agent after the run.
pub struct TrialRunner {
    config: RunConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrialRunner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the training phase followed by the testing phase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActionSet`] before any trial starts if the
    /// agent was built over a different action set than `env` reports.
    pub fn run<R: RandomSource>(
        &mut self,
        agent: &mut LearningAgent<R>,
        env: &mut dyn Environment,
        planner: &mut dyn RoutePlanner,
    ) -> Result<RunSummary> {
        self.config.validate()?;
        if agent.valid_actions() != env.valid_actions() {
            return Err(Error::InvalidActionSet {
                reason: format!(
                    "agent acts over {:?} but the environment allows {:?}",
                    agent.valid_actions(),
                    env.valid_actions()
                ),
            });
        }

        let training_epsilons = if agent.is_learning() {
            Some(self.config.training_epsilons(agent.epsilon()))
        } else {
            None
        };
        let training_trials = training_epsilons
            .as_ref()
            .map_or(self.config.baseline_trials, Vec::len);
        let expected = training_trials + self.config.testing_trials;

        info!(
            mode = ?agent.mode(),
            training_trials,
            testing_trials = self.config.testing_trials,
            "starting run"
        );
        self.notify(|observer| observer.on_run_start(expected))?;

        let mut records = Vec::with_capacity(expected);
        for index in 0..training_trials {
            if let Some(epsilons) = &training_epsilons {
                agent.set_epsilon(epsilons[index])?;
            }
            let record = self.run_trial(records.len() + 1, false, agent, env, planner)?;
            records.push(record);
        }

        agent.set_epsilon(0.0)?;
        agent.set_alpha(0.0)?;
        info!(states = agent.q_table().len(), "training finished, testing");
        for _ in 0..self.config.testing_trials {
            let record = self.run_trial(records.len() + 1, true, agent, env, planner)?;
            records.push(record);
        }

        let summary = RunSummary::from_records(records, agent.q_table().len());
        info!(
            training_success_rate = summary.training.success_rate,
            testing_success_rate = summary.testing.success_rate,
            states = summary.states_learned,
            "run finished"
        );
        self.notify(|observer| observer.on_run_end(&summary))?;
        Ok(summary)
    }

    fn run_trial<R: RandomSource>(
        &mut self,
        trial: usize,
        testing: bool,
        agent: &mut LearningAgent<R>,
        env: &mut dyn Environment,
        planner: &mut dyn RoutePlanner,
    ) -> Result<TrialRecord> {
        env.begin_trial(testing)?;
        agent.reset();
        self.notify(|observer| observer.on_trial_start(trial, testing))?;

        while !env.status().is_terminal()
            && agent.counters().steps < self.config.max_steps_per_trial
        {
            let StepOutcome {
                state,
                decision,
                reward,
            } = agent.step(env, planner)?;
            let record = StepRecord {
                trial,
                step: agent.counters().steps,
                testing,
                state,
                action: decision.action,
                branch: decision.branch,
                reward,
            };
            self.notify(|observer| observer.on_step(&record))?;
        }

        let outcome = match env.status() {
            TrialStatus::Arrived => TrialOutcome::Arrived,
            TrialStatus::DeadlineReached => TrialOutcome::DeadlineReached,
            TrialStatus::Running => TrialOutcome::StepLimit,
        };
        let counters = agent.counters();
        let record = TrialRecord {
            trial,
            testing,
            outcome,
            steps: counters.steps,
            total_reward: counters.total_reward,
            epsilon: agent.epsilon(),
            alpha: agent.alpha(),
            states: agent.q_table().len(),
        };
        debug!(
            trial,
            testing,
            outcome = ?record.outcome,
            steps = record.steps,
            reward = record.total_reward,
            "trial finished"
        );
        self.notify(|observer| observer.on_trial_end(&record))?;
        Ok(record)
    }

    fn notify<F>(&mut self, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn Observer) -> Result<()>,
    {
        for observer in &mut self.observers {
            event(observer.as_mut())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        trial: usize,
        testing: bool,
        outcome: TrialOutcome,
        reward: f64,
        steps: usize,
    ) -> TrialRecord {
        TrialRecord {
            trial,
            testing,
            outcome,
            steps,
            total_reward: reward,
            epsilon: 0.0,
            alpha: 0.0,
            states: 0,
        }
    }

    #[test]
    fn test_training_epsilons_stop_below_tolerance() {
        let config = RunConfig {
            schedule: ExplorationSchedule::Linear { step: 0.25 },
            ..RunConfig::default()
        };
        assert_eq!(config.training_epsilons(1.0), vec![0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_training_epsilons_respect_guard() {
        let config = RunConfig {
            schedule: ExplorationSchedule::Constant,
            max_training_trials: 7,
            ..RunConfig::default()
        };
        assert_eq!(config.training_epsilons(1.0).len(), 7);
    }

    #[test]
    fn test_runner_keeps_its_config() {
        let config = RunConfig {
            testing_trials: 3,
            ..RunConfig::default()
        };
        let runner = TrialRunner::new(config.clone());
        assert_eq!(runner.config(), &config);
    }

    #[test]
    fn test_validate_rejects_zero_step_cap() {
        let config = RunConfig {
            max_steps_per_trial: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_trial_stats() {
        let records = vec![
            record(1, false, TrialOutcome::Arrived, 4.0, 10),
            record(2, false, TrialOutcome::DeadlineReached, -2.0, 20),
            record(3, true, TrialOutcome::Arrived, 6.0, 8),
        ];
        let summary = RunSummary::from_records(records, 12);

        assert_eq!(summary.training.trials, 2);
        assert_eq!(summary.training.successes, 1);
        assert_eq!(summary.training.success_rate, 0.5);
        assert_eq!(summary.training.mean_reward, 1.0);
        assert_eq!(summary.training.mean_steps, 15.0);
        assert_eq!(summary.testing.trials, 1);
        assert_eq!(summary.testing.success_rate, 1.0);
        assert_eq!(summary.states_learned, 12);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = TrialStats::from_records(Vec::<TrialRecord>::new().iter());
        assert_eq!(stats, TrialStats::default());
    }
}
