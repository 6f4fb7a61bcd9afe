//! Domain vocabulary shared by the agent and its collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A move the cab can make at an intersection.
///
/// `Idle` is the single no-op: the cab holds its position for one step.
/// It is written as `none` in logs and serialized records alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[serde(rename = "none")]
    Idle,
    Forward,
    Left,
    Right,
}

impl Action {
    /// The standard smartcab action set, no-op first.
    pub const ALL: [Action; 4] = [Action::Idle, Action::Forward, Action::Left, Action::Right];

    /// Whether this is the no-op action.
    pub fn is_noop(self) -> bool {
        matches!(self, Action::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Idle => "none",
            Action::Forward => "forward",
            Action::Left => "left",
            Action::Right => "right",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic-light color at the cab's intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Light {
    Red,
    Green,
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Light::Red => f.write_str("red"),
            Light::Green => f.write_str("green"),
        }
    }
}

/// Snapshot of what the cab senses at its intersection.
///
/// Each traffic reading is the intended move of the vehicle in that
/// relative position, or `None` when no vehicle is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sensed {
    pub light: Light,
    pub left: Option<Action>,
    pub oncoming: Option<Action>,
    pub right: Option<Action>,
}

impl Sensed {
    /// An intersection with the given light and no other traffic.
    pub fn clear(light: Light) -> Self {
        Self {
            light,
            left: None,
            oncoming: None,
            right: None,
        }
    }
}

/// Display helper for an optional traffic reading.
pub(crate) struct Reading(pub Option<Action>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(action) => write!(f, "{action}"),
            None => f.write_str("-"),
        }
    }
}
