//! Tabular Q-learning for the driving agent
//!
//! ## Control loop
//!
//! 1. [`State::build`](crate::State::build) turns the planner's waypoint and
//!    the sensed intersection into a state key.
//! 2. In learning mode the state is inserted into the [`QTable`] with every
//!    legal action at 0.0, if it is not there yet.
//! 3. The policy picks an action: uniform in baseline mode, ε-greedy with
//!    uniform tie-breaking in learning mode.
//! 4. The environment executes the action and returns a reward.
//! 5. The learner applies `Q(s,a) ← Q(s,a) + α[r - Q(s,a)]`.
//!
//! Rewards are treated as immediate and complete for the transition; there
//! is no discounted successor term.
//!
//! ## Usage Example
//!
//! ```no_run
//! use smartcab::{Action, app::AgentConfig, q_learning::LearningAgent};
//!
//! let agent = LearningAgent::new(
//!     Action::ALL.to_vec(),
//!     AgentConfig::new()
//!         .with_learning(true)
//!         .with_epsilon(1.0) // exploration
//!         .with_alpha(0.5),  // learning rate
//! )?;
//! # Ok::<(), smartcab::Error>(())
//! ```

pub mod agent;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{LearningAgent, StepOutcome, TrialCounters};
pub use policy::{Branch, Decision, Mode, choose_uniform, epsilon_greedy};
pub use q_table::{ActionValues, QTable};
