//! Environment and route-planner ports - the agent's view of the simulation.
//!
//! Traffic physics, rendering and route planning live behind these traits.
//! The agent only senses, asks for a waypoint, acts, and receives a reward.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    types::{Action, Sensed},
};

/// Progress of the current trial as reported by the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    /// The cab is still driving
    Running,
    /// The cab reached its destination
    Arrived,
    /// The trial deadline expired before arrival
    DeadlineReached,
}

impl TrialStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TrialStatus::Running)
    }
}

/// Simulated traffic world the agent drives in.
pub trait Environment {
    /// Fixed, ordered set of legal actions, including exactly one no-op.
    fn valid_actions(&self) -> &[Action];

    /// Start a new trial (place the cab, pick a destination).
    ///
    /// `testing` marks evaluation trials so the environment can, for
    /// example, enforce deadlines differently.
    fn begin_trial(&mut self, testing: bool) -> Result<()>;

    /// Readings at the cab's current intersection.
    fn sense(&self) -> Sensed;

    /// Execute an action and return its reward.
    fn act(&mut self, action: Action) -> Result<f64>;

    /// Status of the current trial.
    fn status(&self) -> TrialStatus;
}

/// Oracle recommending the next move toward the destination.
pub trait RoutePlanner {
    /// Next recommended action; `Action::Idle` once the destination is reached.
    fn next_waypoint(&mut self) -> Action;
}
