//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Result, error::check_unit_interval, q_learning::Mode};

/// Configuration for creating a [`LearningAgent`](crate::q_learning::LearningAgent).
///
/// # Examples
///
/// ```
/// use smartcab::app::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_learning(true)
///     .with_epsilon(0.8)
///     .with_alpha(0.4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Whether the agent starts in learning mode
    pub learning: bool,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Initial learning rate α
    pub alpha: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the defaults:
    /// - Learning: off (baseline driver)
    /// - Epsilon: 1.0
    /// - Alpha: 0.5
    /// - Seed: None (non-deterministic)
    pub fn new() -> Self {
        Self {
            learning: false,
            epsilon: 1.0,
            alpha: 0.5,
            seed: None,
        }
    }

    pub fn with_learning(mut self, learning: bool) -> Self {
        self.learning = learning;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(&self) -> Mode {
        Mode::from_learning(self.learning)
    }

    /// Check that ε and α are finite and within [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("epsilon", self.epsilon)?;
        check_unit_interval("alpha", self.alpha)?;
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
