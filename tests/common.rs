//! Common test utilities for the smartcab test suite.
//!
//! Provides a scripted corridor environment and fixed route planners so
//! harness tests run without a traffic simulator.

#![allow(dead_code)]

use smartcab::{
    Action, Error, Light, Result, Sensed,
    ports::{Environment, RoutePlanner, TrialStatus},
};

/// Reward for moving along the planned route
pub const ON_ROUTE_REWARD: f64 = 2.0;
/// Reward for turning away from the route
pub const OFF_ROUTE_REWARD: f64 = -1.0;

/// A straight road: the cab arrives after `distance` forward moves and
/// times out after `deadline` steps.
#[derive(Debug, Clone)]
pub struct CorridorEnvironment {
    actions: Vec<Action>,
    sensed: Sensed,
    distance: usize,
    deadline: usize,
    progress: usize,
    steps: usize,
    pub trials_begun: usize,
    pub testing_trials_begun: usize,
    pub actions_taken: Vec<Action>,
}

impl CorridorEnvironment {
    pub fn new(distance: usize, deadline: usize) -> Self {
        Self {
            actions: Action::ALL.to_vec(),
            sensed: Sensed::clear(Light::Green),
            distance,
            deadline,
            progress: 0,
            steps: 0,
            trials_begun: 0,
            testing_trials_begun: 0,
            actions_taken: Vec::new(),
        }
    }

    /// Restrict the legal moves the corridor reports.
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_sensed(mut self, sensed: Sensed) -> Self {
        self.sensed = sensed;
        self
    }
}

impl Environment for CorridorEnvironment {
    fn valid_actions(&self) -> &[Action] {
        &self.actions
    }

    fn begin_trial(&mut self, testing: bool) -> Result<()> {
        self.progress = 0;
        self.steps = 0;
        self.trials_begun += 1;
        if testing {
            self.testing_trials_begun += 1;
        }
        Ok(())
    }

    fn sense(&self) -> Sensed {
        self.sensed
    }

    fn act(&mut self, action: Action) -> Result<f64> {
        self.steps += 1;
        self.actions_taken.push(action);
        Ok(match action {
            Action::Forward => {
                self.progress += 1;
                ON_ROUTE_REWARD
            }
            Action::Idle => 0.0,
            Action::Left | Action::Right => OFF_ROUTE_REWARD,
        })
    }

    fn status(&self) -> TrialStatus {
        if self.progress >= self.distance {
            TrialStatus::Arrived
        } else if self.steps >= self.deadline {
            TrialStatus::DeadlineReached
        } else {
            TrialStatus::Running
        }
    }
}

/// Environment whose `act` always fails.
#[derive(Debug, Default)]
pub struct BrokenEnvironment {
    actions: Vec<Action>,
}

impl BrokenEnvironment {
    pub fn new() -> Self {
        Self {
            actions: Action::ALL.to_vec(),
        }
    }
}

impl Environment for BrokenEnvironment {
    fn valid_actions(&self) -> &[Action] {
        &self.actions
    }

    fn begin_trial(&mut self, _testing: bool) -> Result<()> {
        Ok(())
    }

    fn sense(&self) -> Sensed {
        Sensed::clear(Light::Red)
    }

    fn act(&mut self, _action: Action) -> Result<f64> {
        Err(Error::Environment {
            message: "simulator went away".to_string(),
        })
    }

    fn status(&self) -> TrialStatus {
        TrialStatus::Running
    }
}

/// Planner that always recommends the same move.
#[derive(Debug, Clone, Copy)]
pub struct FixedPlanner(pub Action);

impl RoutePlanner for FixedPlanner {
    fn next_waypoint(&mut self) -> Action {
        self.0
    }
}
