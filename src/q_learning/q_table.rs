//! Q-table implementation for the driving agent

use std::collections::{BTreeMap, HashMap};

use crate::{
    error::{Error, Result, check_finite},
    state::State,
    types::Action,
};

/// Per-action value estimates for one state
pub type ActionValues = BTreeMap<Action, f64>;

/// Q-table mapping states to per-action value estimates
///
/// The table owns the legal-action set. Every state it holds has exactly one
/// entry per legal action; states are only ever added, never removed or
/// resized.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Legal actions, in the order the environment supplied them
    actions: Vec<Action>,
    /// Q-values: state -> action -> estimate
    entries: HashMap<State, ActionValues>,
}

impl QTable {
    /// Create an empty Q-table over the given legal actions
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            entries: HashMap::new(),
        }
    }

    /// Legal actions covered by every entry
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Insert `state` with every legal action at 0.0 if it is not present.
    ///
    /// Returns `true` when the state was inserted. Existing entries are
    /// never touched.
    pub fn ensure(&mut self, state: State) -> bool {
        if self.entries.contains_key(&state) {
            return false;
        }
        let values = self.actions.iter().map(|&action| (action, 0.0)).collect();
        self.entries.insert(state, values);
        true
    }

    pub fn contains(&self, state: &State) -> bool {
        self.entries.contains_key(state)
    }

    /// All action values for a state, if present
    pub fn values(&self, state: &State) -> Option<&ActionValues> {
        self.entries.get(state)
    }

    /// Q-value for a state-action pair, if present
    pub fn value(&self, state: &State, action: Action) -> Option<f64> {
        self.entries.get(state)?.get(&action).copied()
    }

    /// Overwrite the value of an existing state-action pair.
    ///
    /// Does not grow the table: the state must already be present and the
    /// action must be legal. The value must be finite.
    pub fn set(&mut self, state: &State, action: Action, value: f64) -> Result<()> {
        check_finite("value", value)?;
        *self.slot_mut(state, action)? = value;
        Ok(())
    }

    /// Maximum Q-value over the state's actions
    ///
    /// Ties are irrelevant here; they are resolved by the policy.
    pub fn best_value(&self, state: &State) -> Result<f64> {
        let values = self.require(state)?;
        Ok(values.values().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Actions whose value equals the state's maximum exactly, in legal-action order
    pub fn best_actions(&self, state: &State) -> Result<Vec<Action>> {
        let best = self.best_value(state)?;
        let values = self.require(state)?;
        Ok(self
            .actions
            .iter()
            .copied()
            .filter(|action| values.get(action).is_some_and(|&value| value == best))
            .collect())
    }

    /// Immediate-reward update
    ///
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    ///
    /// Returns the new value. No discounted successor term and no clamping.
    /// A non-finite reward is rejected, so every stored estimate stays finite.
    pub fn update(&mut self, state: &State, action: Action, reward: f64, alpha: f64) -> Result<f64> {
        check_finite("reward", reward)?;
        let slot = self.slot_mut(state, action)?;
        *slot += alpha * (reward - *slot);
        Ok(*slot)
    }

    /// Number of states stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored states and their action values
    pub fn iter(&self) -> impl Iterator<Item = (&State, &ActionValues)> {
        self.entries.iter()
    }

    fn require(&self, state: &State) -> Result<&ActionValues> {
        self.entries.get(state).ok_or_else(|| Error::MissingState {
            state: state.to_string(),
        })
    }

    fn slot_mut(&mut self, state: &State, action: Action) -> Result<&mut f64> {
        let values = self
            .entries
            .get_mut(state)
            .ok_or_else(|| Error::MissingState {
                state: state.to_string(),
            })?;
        values.get_mut(&action).ok_or_else(|| Error::UnknownAction {
            action,
            state: state.to_string(),
        })
    }
}
