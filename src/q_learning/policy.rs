//! Action selection: uniform baseline and ε-greedy with random tie-breaking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::RandomSource,
    q_learning::q_table::QTable,
    state::State,
    types::Action,
};

/// Operating mode of the agent, set by the training harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Naive driver: uniform random actions, no table reads or writes
    #[default]
    Baseline,
    /// ε-greedy over the Q-table, with updates
    Learning,
}

impl Mode {
    pub fn from_learning(learning: bool) -> Self {
        if learning {
            Mode::Learning
        } else {
            Mode::Baseline
        }
    }

    pub fn is_learning(self) -> bool {
        matches!(self, Mode::Learning)
    }
}

/// Which path produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Non-learning uniform choice over all legal actions
    Baseline,
    /// Exploration roll fell below ε: uniform choice over all legal actions
    Explore,
    /// A single action attained the maximum value
    Exploit,
    /// Several actions tied at the maximum; one was drawn uniformly
    TieBreak { tied: usize },
}

impl Branch {
    /// Whether the action came from a uniform random draw
    pub fn is_random(self) -> bool {
        !matches!(self, Branch::Exploit)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Baseline => f.write_str("baseline"),
            Branch::Explore => f.write_str("explore"),
            Branch::Exploit => f.write_str("exploit"),
            Branch::TieBreak { tied } => write!(f, "tie-break({tied})"),
        }
    }
}

/// An action together with the branch that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub branch: Branch,
}

/// Uniform choice over `actions`.
pub fn choose_uniform<R>(actions: &[Action], rng: &mut R) -> Result<Action>
where
    R: RandomSource + ?Sized,
{
    if actions.is_empty() {
        return Err(Error::InvalidActionSet {
            reason: "cannot choose from an empty action set".to_string(),
        });
    }
    Ok(actions[rng.pick(actions.len())])
}

/// ε-greedy selection for a state already present in `table`.
///
/// One roll decides exploration; it takes precedence even over a unique
/// best action. Otherwise the maximum-valued actions are collected by exact
/// equality and, if more than one, drawn uniformly.
pub fn epsilon_greedy<R>(
    table: &QTable,
    state: &State,
    epsilon: f64,
    rng: &mut R,
) -> Result<Decision>
where
    R: RandomSource + ?Sized,
{
    if rng.roll() < epsilon {
        let action = choose_uniform(table.actions(), rng)?;
        return Ok(Decision {
            action,
            branch: Branch::Explore,
        });
    }

    let best = table.best_actions(state)?;
    match best.as_slice() {
        [action] => Ok(Decision {
            action: *action,
            branch: Branch::Exploit,
        }),
        tied => {
            let action = choose_uniform(tied, rng)?;
            Ok(Decision {
                action,
                branch: Branch::TieBreak { tied: tied.len() },
            })
        }
    }
}
