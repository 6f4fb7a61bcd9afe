//! Canonical state keys built from planner and sensor readings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Action, Light, Reading, Sensed};

/// Tuple form of a [`State`]: (waypoint, light, left, oncoming, right).
pub type StateTuple = (Action, Light, Option<Action>, Option<Action>, Option<Action>);

/// Decision-relevant situation of the cab at one step.
///
/// Field order is fixed; two states built from equal readings are equal
/// regardless of where the readings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    /// Move recommended by the route planner
    pub waypoint: Action,
    /// Traffic-light color
    pub light: Light,
    /// Intended move of the vehicle on the left
    pub left: Option<Action>,
    /// Intended move of the oncoming vehicle
    pub oncoming: Option<Action>,
    /// Intended move of the vehicle on the right
    pub right: Option<Action>,
}

impl State {
    /// Build a state from the planner's next waypoint and a sensed snapshot.
    ///
    /// Readings are passed through as supplied.
    pub fn build(waypoint: Action, sensed: &Sensed) -> Self {
        Self {
            waypoint,
            light: sensed.light,
            left: sensed.left,
            oncoming: sensed.oncoming,
            right: sensed.right,
        }
    }

    pub fn as_tuple(&self) -> StateTuple {
        (
            self.waypoint,
            self.light,
            self.left,
            self.oncoming,
            self.right,
        )
    }
}

impl From<StateTuple> for State {
    fn from((waypoint, light, left, oncoming, right): StateTuple) -> Self {
        Self {
            waypoint,
            light,
            left,
            oncoming,
            right,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.waypoint,
            self.light,
            Reading(self.left),
            Reading(self.oncoming),
            Reading(self.right)
        )
    }
}
