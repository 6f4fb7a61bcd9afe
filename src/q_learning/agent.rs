//! Q-learning driving agent
//!
//! The agent owns its Q-table and randomness source. Each simulation step is
//! a pass through state building, action selection and the learning update;
//! nothing carries over between steps except the table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    adapters::StdRandom,
    app::AgentConfig,
    error::{Error, Result, check_finite, check_unit_interval},
    ports::{Environment, RandomSource, RoutePlanner},
    q_learning::{
        policy::{Branch, Decision, Mode, choose_uniform, epsilon_greedy},
        q_table::QTable,
    },
    state::State,
    types::Action,
};

/// Per-trial counters, cleared by [`LearningAgent::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialCounters {
    pub steps: usize,
    pub total_reward: f64,
}

/// Everything that happened during one [`LearningAgent::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub state: State,
    pub decision: Decision,
    pub reward: f64,
}

fn validate_actions(actions: &[Action]) -> Result<()> {
    if actions.is_empty() {
        return Err(Error::InvalidActionSet {
            reason: "no legal actions supplied".to_string(),
        });
    }
    let mut seen = HashSet::with_capacity(actions.len());
    if let Some(duplicate) = actions.iter().find(|&&action| !seen.insert(action)) {
        return Err(Error::InvalidActionSet {
            reason: format!("action '{duplicate}' listed more than once"),
        });
    }
    if !actions.iter().any(|action| action.is_noop()) {
        return Err(Error::InvalidActionSet {
            reason: "no no-op action in the set".to_string(),
        });
    }
    Ok(())
}

/// Tabular Q-learning agent (immediate-reward averaging)
///
/// In [`Mode::Baseline`] it drives uniformly at random and never touches the
/// table. In [`Mode::Learning`] it creates states lazily, acts ε-greedily
/// and moves estimates toward observed rewards.
///
/// # Examples
///
/// ```
/// use smartcab::{Action, Light, Sensed, State, app::AgentConfig, q_learning::LearningAgent};
///
/// let config = AgentConfig::new().with_learning(true).with_epsilon(0.0).with_seed(1);
/// let mut agent = LearningAgent::new(Action::ALL.to_vec(), config)?;
///
/// let state = State::build(Action::Forward, &Sensed::clear(Light::Green));
/// agent.learn(&state, Action::Forward, 2.0)?;
/// let decision = agent.choose_action(&state)?;
/// assert_eq!(decision.action, Action::Forward);
/// # Ok::<(), smartcab::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LearningAgent<R: RandomSource = StdRandom> {
    q_table: QTable,
    mode: Mode,
    epsilon: f64,
    alpha: f64,
    rng: R,
    counters: TrialCounters,
}

impl LearningAgent<StdRandom> {
    /// Create an agent over the environment's legal actions.
    ///
    /// The random source is seeded from `config.seed` when present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActionSet`] for an empty set, duplicates or a
    /// set without a no-op, and [`Error::InvalidParameter`] for ε or α
    /// outside [0, 1].
    pub fn new(valid_actions: Vec<Action>, config: AgentConfig) -> Result<Self> {
        let rng = StdRandom::from_seed(config.seed);
        Self::with_random(valid_actions, config, rng)
    }

    /// Create an agent over the legal actions `env` reports.
    pub fn for_environment(env: &dyn Environment, config: AgentConfig) -> Result<Self> {
        Self::new(env.valid_actions().to_vec(), config)
    }
}

impl<R: RandomSource> LearningAgent<R> {
    /// Create an agent with an explicit random source.
    pub fn with_random(valid_actions: Vec<Action>, config: AgentConfig, rng: R) -> Result<Self> {
        validate_actions(&valid_actions)?;
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(valid_actions),
            mode: config.mode(),
            epsilon: config.epsilon,
            alpha: config.alpha,
            rng,
            counters: TrialCounters::default(),
        })
    }

    pub fn valid_actions(&self) -> &[Action] {
        self.q_table.actions()
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable access to the table, e.g. to seed known estimates.
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn is_learning(&self) -> bool {
        self.mode.is_learning()
    }

    pub fn set_learning(&mut self, learning: bool) {
        self.mode = Mode::from_learning(learning);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.epsilon = check_unit_interval("epsilon", epsilon)?;
        Ok(())
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.alpha = check_unit_interval("alpha", alpha)?;
        Ok(())
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn counters(&self) -> TrialCounters {
        self.counters
    }

    /// Start-of-trial hook: clears the per-trial counters.
    ///
    /// The Q-table and learning parameters are left alone.
    pub fn reset(&mut self) {
        self.counters = TrialCounters::default();
    }

    /// Build the current state from the planner and the environment's senses.
    pub fn build_state(&self, planner: &mut dyn RoutePlanner, env: &dyn Environment) -> State {
        State::build(planner.next_waypoint(), &env.sense())
    }

    /// Insert `state` with zeroed values, only in learning mode.
    ///
    /// Returns `true` when a new entry was created.
    pub fn ensure_state(&mut self, state: &State) -> bool {
        if !self.mode.is_learning() {
            return false;
        }
        let inserted = self.q_table.ensure(*state);
        if inserted {
            trace!(state = %state, states = self.q_table.len(), "created q-table entry");
        }
        inserted
    }

    /// Maximum Q-value for a state already in the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if the state was never ensured.
    pub fn best_value(&self, state: &State) -> Result<f64> {
        self.q_table.best_value(state)
    }

    /// Choose an action for `state`.
    ///
    /// Baseline mode ignores the table entirely. Learning mode ensures the
    /// state exists, then selects ε-greedily with random tie-breaking.
    pub fn choose_action(&mut self, state: &State) -> Result<Decision> {
        let decision = match self.mode {
            Mode::Baseline => Decision {
                action: choose_uniform(self.q_table.actions(), &mut self.rng)?,
                branch: Branch::Baseline,
            },
            Mode::Learning => {
                self.ensure_state(state);
                epsilon_greedy(&self.q_table, state, self.epsilon, &mut self.rng)?
            }
        };
        debug!(
            state = %state,
            action = %decision.action,
            branch = %decision.branch,
            epsilon = self.epsilon,
            "chose action"
        );
        Ok(decision)
    }

    /// Move Q(state, action) toward `reward` by α.
    ///
    /// Has no effect outside learning mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFinite`] for a NaN or infinite reward, before the
    /// table is touched.
    pub fn learn(&mut self, state: &State, action: Action, reward: f64) -> Result<()> {
        if !self.mode.is_learning() {
            return Ok(());
        }
        check_finite("reward", reward)?;
        self.ensure_state(state);
        let updated = self.q_table.update(state, action, reward, self.alpha)?;
        debug!(
            state = %state,
            action = %action,
            reward,
            alpha = self.alpha,
            q = updated,
            "updated q-value"
        );
        Ok(())
    }

    /// Run one control-loop step: sense, choose, act, learn.
    pub fn step(
        &mut self,
        env: &mut dyn Environment,
        planner: &mut dyn RoutePlanner,
    ) -> Result<StepOutcome> {
        let state = self.build_state(planner, env);
        let decision = self.choose_action(&state)?;
        let reward = env.act(decision.action)?;
        self.learn(&state, decision.action, reward)?;

        self.counters.steps += 1;
        self.counters.total_reward += reward;

        Ok(StepOutcome {
            state,
            decision,
            reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::ScriptedRandom, types::Light};

    fn state() -> State {
        State::from((Action::Forward, Light::Red, None, Some(Action::Left), Some(Action::Right)))
    }

    fn agent(learning: bool) -> LearningAgent<ScriptedRandom> {
        let config = AgentConfig::new().with_learning(learning).with_epsilon(0.5).with_alpha(0.1);
        LearningAgent::with_random(Action::ALL.to_vec(), config, ScriptedRandom::new()).unwrap()
    }

    #[test]
    fn test_rejects_empty_action_set() {
        let err = LearningAgent::new(Vec::new(), AgentConfig::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidActionSet { .. }));
    }

    #[test]
    fn test_rejects_duplicate_actions() {
        let actions = vec![Action::Idle, Action::Left, Action::Left];
        let err = LearningAgent::new(actions, AgentConfig::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidActionSet { .. }));
    }

    #[test]
    fn test_rejects_set_without_noop() {
        let actions = vec![Action::Forward, Action::Left, Action::Right];
        let err = LearningAgent::new(actions, AgentConfig::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidActionSet { .. }));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let config = AgentConfig::new().with_epsilon(2.0);
        let err = LearningAgent::new(Action::ALL.to_vec(), config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "epsilon", .. }));
    }

    #[test]
    fn test_setters_validate_range() {
        let mut agent = agent(true);
        assert!(agent.set_alpha(-0.5).is_err());
        assert_eq!(agent.alpha(), 0.1);
        agent.set_epsilon(0.25).unwrap();
        assert_eq!(agent.epsilon(), 0.25);
    }

    #[test]
    fn test_learn_creates_unseen_state() {
        let mut agent = agent(true);
        agent.learn(&state(), Action::Left, 4.0).unwrap();

        let values = agent.q_table().values(&state()).unwrap();
        assert!((values[&Action::Left] - 0.4).abs() < 1e-12);
        assert_eq!(values[&Action::Idle], 0.0);
    }

    #[test]
    fn test_reset_clears_counters_only() {
        let mut agent = agent(true);
        agent.learn(&state(), Action::Left, 1.0).unwrap();
        agent.counters.steps = 3;
        agent.counters.total_reward = 2.5;

        agent.reset();
        assert_eq!(agent.counters(), TrialCounters::default());
        assert_eq!(agent.q_table().len(), 1);
    }

    #[test]
    fn test_rng_mut_reaches_the_random_source() {
        let mut agent = agent(false);
        agent.choose_action(&state()).unwrap();
        assert_eq!(agent.rng().pick_lens(), vec![4]);

        agent.rng_mut().clear_draws();
        assert!(agent.rng().draws().is_empty());
    }

    #[test]
    fn test_non_finite_reward_is_rejected() {
        let mut agent = agent(true);
        for reward in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = agent.learn(&state(), Action::Left, reward).unwrap_err();
            assert!(matches!(err, Error::NonFinite { name: "reward", .. }));
        }
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_toggling_mode_keeps_table() {
        let mut agent = agent(true);
        agent.ensure_state(&state());
        agent.set_learning(false);
        assert_eq!(agent.mode(), Mode::Baseline);
        assert!(agent.q_table().contains(&state()));
        agent.set_mode(Mode::Learning);
        assert!(agent.is_learning());
    }
}
